//! Serialization of URI references.

use crate::{
    imp::{AuthMeta, HostMeta, Meta, Uri},
    span::Span,
};
use alloc::string::String;
use borrow_or_share::Bos;

/// Serializes a URI reference into a freshly allocated string.
///
/// Components are written in order: `scheme ":"`, `"//" authority`, path,
/// `"?" query` and `"#" fragment`, each only when present. A present but
/// empty query or fragment keeps its delimiter.
///
/// # Examples
///
/// ```
/// use uriref::{recompose::serialize, Uri};
///
/// let uri = Uri::parse("http://example.com/?#")?;
/// assert_eq!(serialize(&uri), "http://example.com/?#");
/// # Ok::<_, uriref::ParseError>(())
/// ```
#[must_use]
pub fn serialize<T: Bos<str>>(uri: &Uri<T>) -> String {
    Parts::of(uri).write().0
}

/// Components of a URI reference to be written into a new buffer.
#[derive(Clone, Copy)]
pub(crate) struct Parts<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<AuthParts<'a>>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

#[derive(Clone, Copy)]
pub(crate) struct AuthParts<'a> {
    pub userinfo: Option<&'a str>,
    pub host: &'a str,
    pub host_meta: HostMeta,
    pub port: Option<&'a str>,
}

impl<'a> AuthParts<'a> {
    pub fn of(val: &'a str, meta: AuthMeta) -> Self {
        Self {
            userinfo: meta.userinfo.map(|s| s.slice(val)),
            host: meta.host.slice(val),
            host_meta: meta.host_meta,
            port: meta.port.map(|s| s.slice(val)),
        }
    }

    fn len(&self) -> usize {
        let mut len = self.host.len();
        if let Some(userinfo) = self.userinfo {
            len += userinfo.len() + 1;
        }
        if let Some(port) = self.port {
            len += port.len() + 1;
        }
        len
    }
}

impl<'a> Parts<'a> {
    pub fn of<T: Bos<str>>(uri: &'a Uri<T>) -> Self {
        let val = uri.as_str();
        Self {
            scheme: uri.scheme().map(|s| s.as_str()),
            authority: uri.meta.auth.map(|meta| AuthParts::of(val, meta)),
            path: uri.path().as_str(),
            query: uri.query().map(|s| s.as_str()),
            fragment: uri.fragment().map(|s| s.as_str()),
        }
    }

    /// Returns the prefix needed to keep the path inside the grammar.
    fn path_prefix(&self) -> &'static str {
        if self.authority.is_none() && self.path.starts_with("//") {
            // Would otherwise be taken for an authority.
            "/."
        } else if self.scheme.is_none()
            && self.authority.is_none()
            && !self.path.starts_with('/')
            && self.path.split('/').next().is_some_and(|s| s.contains(':'))
        {
            // Would otherwise be taken for a scheme.
            "./"
        } else {
            ""
        }
    }

    fn len(&self) -> usize {
        let mut len = self.path_prefix().len() + self.path.len();
        if let Some(scheme) = self.scheme {
            len += scheme.len() + 1;
        }
        if let Some(auth) = &self.authority {
            len += auth.len() + 2;
        }
        if let Some(query) = self.query {
            len += query.len() + 1;
        }
        if let Some(fragment) = self.fragment {
            len += fragment.len() + 1;
        }
        len
    }

    /// Writes the components into a new buffer, recording their spans.
    pub fn write(&self) -> (String, Meta) {
        debug_assert!(
            self.authority.is_none() || self.path.is_empty() || self.path.starts_with('/'),
            "rootless path after authority"
        );

        let len = self.len();
        let mut buf = String::with_capacity(len);
        let mut meta = Meta::default();

        if let Some(scheme) = self.scheme {
            buf.push_str(scheme);
            meta.scheme = Some(Span::new(0, buf.len()));
            buf.push(':');
        }

        if let Some(auth) = &self.authority {
            buf.push_str("//");
            let start = buf.len();

            let userinfo = auth.userinfo.map(|userinfo| {
                buf.push_str(userinfo);
                let span = Span::new(start, buf.len());
                buf.push('@');
                span
            });

            let host_start = buf.len();
            buf.push_str(auth.host);
            let host = Span::new(host_start, buf.len());

            let port = auth.port.map(|port| {
                buf.push(':');
                let port_start = buf.len();
                buf.push_str(port);
                Span::new(port_start, buf.len())
            });

            meta.auth = Some(AuthMeta {
                span: Span::new(start, buf.len()),
                userinfo,
                host,
                host_meta: auth.host_meta,
                port,
            });
        }

        let path_start = buf.len();
        buf.push_str(self.path_prefix());
        buf.push_str(self.path);
        meta.path = Span::new(path_start, buf.len());

        if let Some(query) = self.query {
            buf.push('?');
            let start = buf.len();
            buf.push_str(query);
            meta.query = Some(Span::new(start, buf.len()));
        }

        if let Some(fragment) = self.fragment {
            buf.push('#');
            let start = buf.len();
            buf.push_str(fragment);
            meta.fragment = Some(Span::new(start, buf.len()));
        }

        debug_assert_eq!(buf.len(), len);
        (buf, meta)
    }

    /// Writes the components into a new `Uri<String>`.
    pub fn recompose(&self) -> Uri<String> {
        Uri::from_pair(self.write())
    }
}

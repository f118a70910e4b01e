//! Module for normalization.

use crate::{
    component::Scheme,
    imp::{HostMeta, Uri},
    parse,
    pct_enc::{self, encoder::Data, Decode, DecodedChunk, Encoder},
    recompose::Parts,
    resolve,
};
use alloc::{string::String, vec::Vec};
use borrow_or_share::Bos;

/// Selects the components a [`Normalizer`] touches.
///
/// Every flag defaults to `true`. Components whose flag is `false`
/// are copied verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizeMask {
    /// Lowercase the scheme.
    pub scheme: bool,
    /// Normalize percent-encoded octets in the userinfo.
    pub userinfo: bool,
    /// Normalize the host and elide the default port.
    pub host: bool,
    /// Normalize percent-encoded octets in the path and remove dot segments.
    pub path: bool,
    /// Normalize percent-encoded octets in the query.
    pub query: bool,
    /// Normalize percent-encoded octets in the fragment.
    pub fragment: bool,
}

impl NormalizeMask {
    /// A mask with every flag set.
    pub const ALL: Self = Self {
        scheme: true,
        userinfo: true,
        host: true,
        path: true,
        query: true,
        fragment: true,
    };

    /// A mask with no flag set.
    pub const NONE: Self = Self {
        scheme: false,
        userinfo: false,
        host: false,
        path: false,
        query: false,
        fragment: false,
    };
}

impl Default for NormalizeMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// A configurable URI reference normalizer.
///
/// The normalizer performs the syntax-based normalization described in
/// [Section 6.2.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-6.2.2):
///
/// - The scheme is lowercased.
/// - Percent-encoded octets are uppercased, and decoded if they
///   denote unreserved characters.
/// - A registered name is lowercased, after which it is checked again
///   for being an IPv4 address. IPv6 and IPvFuture literals are lowercased.
/// - A port equal to the default port of a known scheme is removed, as is
///   an empty port of such a scheme, as long as the host is not empty.
/// - Dot segments are removed from the path. A rootless path keeps its
///   leading `".."` segments, which would otherwise climb out of
///   the base directory.
///
/// An empty path is never replaced with `"/"`.
///
/// # Examples
///
/// ```
/// use uriref::{normalize::{NormalizeMask, Normalizer}, Uri};
///
/// let uri = Uri::parse("HTTP://User%3a@Example.COM:80/a/./b/%7e?%7E#%41")?;
/// assert_eq!(Normalizer::new().normalize(&uri), "http://User%3A@example.com/a/b/~?~#A");
///
/// let normalizer = Normalizer::new().mask(NormalizeMask {
///     path: false,
///     ..NormalizeMask::default()
/// });
/// assert_eq!(normalizer.normalize(&uri), "http://User%3A@example.com/a/./b/%7e?~#A");
/// # Ok::<_, uriref::ParseError>(())
/// ```
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Normalizer {
    mask: NormalizeMask,
    default_port_f: fn(&Scheme) -> Option<u16>,
}

impl Normalizer {
    /// Creates a new `Normalizer` with default configuration.
    pub fn new() -> Self {
        Self {
            mask: NormalizeMask::ALL,
            default_port_f: Scheme::default_port,
        }
    }

    /// Sets the components to normalize.
    ///
    /// This defaults to [`NormalizeMask::ALL`].
    pub fn mask(mut self, mask: NormalizeMask) -> Self {
        self.mask = mask;
        self
    }

    /// Sets the function with which to get the default port of a scheme.
    ///
    /// This defaults to [`Scheme::default_port`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{component::Scheme, normalize::Normalizer, Uri};
    ///
    /// const SCHEME_FOO: &Scheme = Scheme::new_or_panic("foo");
    ///
    /// let normalizer = Normalizer::new().default_port_with(|scheme| {
    ///     if scheme == SCHEME_FOO {
    ///         Some(4673)
    ///     } else {
    ///         scheme.default_port()
    ///     }
    /// });
    /// let uri = Uri::parse("foo://localhost:4673")?;
    ///
    /// assert_eq!(normalizer.normalize(&uri), "foo://localhost");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn default_port_with(mut self, f: fn(&Scheme) -> Option<u16>) -> Self {
        self.default_port_f = f;
        self
    }

    /// Normalizes the given URI reference.
    #[must_use]
    pub fn normalize<T: Bos<str>>(&self, uri: &Uri<T>) -> Uri<String> {
        let mask = self.mask;
        let (scheme_buf, userinfo_buf, host_buf, path_buf, query_buf, fragment_buf);
        let mut parts = Parts::of(uri);

        if let Some(scheme) = parts.scheme.filter(|_| mask.scheme) {
            scheme_buf = scheme.to_ascii_lowercase();
            parts.scheme = Some(&scheme_buf);
        }

        if let Some(auth) = &mut parts.authority {
            if let Some(userinfo) = auth.userinfo.filter(|_| mask.userinfo) {
                userinfo_buf = normalize_estr(userinfo, false);
                auth.userinfo = Some(&userinfo_buf);
            }

            if mask.host {
                match auth.host_meta {
                    // An IPv4 address is always canonical.
                    HostMeta::Ipv4(_) => {}
                    HostMeta::Ipv6(_) | HostMeta::IpvFuture => {
                        host_buf = auth.host.to_ascii_lowercase();
                        auth.host = &host_buf;
                    }
                    HostMeta::RegName => {
                        host_buf = normalize_estr(auth.host, true);
                        auth.host_meta = parse::parse_v4_or_reg_name(host_buf.as_bytes());
                        auth.host = &host_buf;
                    }
                }

                let default_port = uri.scheme().and_then(self.default_port_f);
                if let (Some(port), Some(default)) = (auth.port, default_port) {
                    let eq_default = port.is_empty() || port.parse().ok() == Some(default);
                    if eq_default && !auth.host.is_empty() {
                        trace!("eliding port {:?} equal to default {}", port, default);
                        auth.port = None;
                    }
                }
            }
        }

        if mask.path {
            let path = normalize_estr(parts.path, false);
            path_buf = if path.starts_with('/') {
                resolve::remove_dot_segments(&path)
            } else {
                remove_dot_segments_rootless(&path)
            };
            parts.path = &path_buf;
        }

        if let Some(query) = parts.query.filter(|_| mask.query) {
            query_buf = normalize_estr(query, false);
            parts.query = Some(&query_buf);
        }

        if let Some(fragment) = parts.fragment.filter(|_| mask.fragment) {
            fragment_buf = normalize_estr(fragment, false);
            parts.fragment = Some(&fragment_buf);
        }

        parts.recompose()
    }

    /// Normalizes the given URI reference in place.
    pub fn normalize_in_place(&self, uri: &mut Uri<String>) {
        *uri = self.normalize(&*uri);
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes percent-encoded unreserved characters and uppercases
/// the remaining percent-encoded octets.
fn normalize_estr(s: &str, to_ascii_lowercase: bool) -> String {
    let mut buf = String::with_capacity(s.len());
    for chunk in Decode::new(s) {
        match chunk {
            DecodedChunk::Unencoded(s) => {
                let i = buf.len();
                buf.push_str(s);
                if to_ascii_lowercase {
                    buf[i..].make_ascii_lowercase();
                }
            }
            DecodedChunk::PctDecoded(mut x) => {
                if Data::TABLE.allows_ascii(x) {
                    if to_ascii_lowercase {
                        x.make_ascii_lowercase();
                    }
                    buf.push(x as char);
                } else {
                    buf.push_str(pct_enc::encode_byte(x));
                }
            }
        }
    }
    buf
}

/// Removes dot segments from a rootless path, keeping leading `".."` segments.
///
/// The result resolves against any base to the same target as `path` does.
fn remove_dot_segments_rootless(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut segs: Vec<&str> = Vec::new();
    let mut ends_in_dir = false;
    for seg in path.split('/') {
        ends_in_dir = matches!(seg, "." | "..");
        match seg {
            "." => {}
            ".." => match segs.last() {
                Some(&last) if last != ".." => {
                    segs.pop();
                }
                _ => segs.push(".."),
            },
            _ => segs.push(seg),
        }
    }

    let mut buf = String::with_capacity(path.len());
    // An empty first segment would make the path absolute.
    if segs.len() > 1 && segs[0].is_empty() {
        buf.push_str("./");
    }
    buf.push_str(&segs.join("/"));
    if buf.is_empty() {
        buf.push('.');
    } else if ends_in_dir {
        buf.push('/');
    }
    buf
}

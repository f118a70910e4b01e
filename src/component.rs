//! URI components.

use crate::{
    imp::{AuthMeta, HostMeta},
    pct_enc::{
        encoder::{Port, RegName, Userinfo},
        table, EStr,
    },
    span::Span,
};
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    num::ParseIntError,
};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively. You should do a case-insensitive
/// comparison if the scheme specification allows both letter cases in the scheme name.
///
/// # Examples
///
/// ```
/// use uriref::{component::Scheme, Uri};
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let scheme = Uri::parse("HTTP://EXAMPLE.COM/")?.scheme().unwrap();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
/// # Ok::<_, uriref::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

/// Default ports of the schemes known to the normalizer.
const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("ftp", 21),
    ("http", 80),
    ("https", 443),
    ("ws", 80),
    ("wss", 443),
];

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    #[inline]
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.validate(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the default port of the scheme, if it is one of
    /// `ftp` (21), `http` (80), `https` (443), `ws` (80) or `wss` (443).
    ///
    /// The comparison is case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::component::Scheme;
    ///
    /// assert_eq!(Scheme::new_or_panic("HTTPS").default_port(), Some(443));
    /// assert_eq!(Scheme::new_or_panic("foo").default_port(), None);
    /// ```
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        DEFAULT_PORTS
            .iter()
            .find(|(name, _)| self.inner.eq_ignore_ascii_case(name))
            .map(|&(_, port)| port)
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

/// The kind of a [host] subcomponent, as recognized by the parser.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// A registered name.
    RegName,
    /// An IPv4 address.
    Ipv4,
    /// An IPv6 address.
    Ipv6,
    /// An IP address of future version.
    IpvFuture,
}

/// An [authority] component.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
///
/// Spans returned by the methods of this type are relative to the whole
/// URI reference the authority belongs to.
#[derive(Clone, Copy)]
pub struct Authority<'a> {
    val: &'a str,
    meta: AuthMeta,
}

impl<'a> Authority<'a> {
    pub(crate) fn new(val: &'a str, meta: AuthMeta) -> Self {
        Self { val, meta }
    }

    /// Returns the authority component as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::parse("http://user@example.com:8080/")?;
    /// let auth = uri.authority().unwrap();
    /// assert_eq!(auth.as_str(), "user@example.com:8080");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.meta.span.slice(self.val)
    }

    /// Returns the span of the authority component, excluding the leading `"//"`.
    #[inline]
    #[must_use]
    pub fn span(&self) -> Span {
        self.meta.span
    }

    /// Returns the optional [userinfo] subcomponent.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{pct_enc::EStr, Uri};
    ///
    /// let uri = Uri::parse("http://user@example.com/")?;
    /// let auth = uri.authority().unwrap();
    /// assert_eq!(auth.userinfo(), Some(EStr::new_or_panic("user")));
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// let auth = uri.authority().unwrap();
    /// assert_eq!(auth.userinfo(), None);
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn userinfo(&self) -> Option<&'a EStr<Userinfo>> {
        self.meta
            .userinfo
            .map(|span| EStr::new_validated(span.slice(self.val)))
    }

    /// Returns the span of the userinfo subcomponent, if present.
    #[must_use]
    pub fn userinfo_span(&self) -> Option<Span> {
        self.meta.userinfo
    }

    /// Returns the [host] subcomponent as a string slice.
    ///
    /// The host subcomponent is always present, although it may be empty.
    /// The square brackets enclosing an IPv6 or IPvFuture address are included.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::parse("http://user@example.com:8080/")?;
    /// assert_eq!(uri.authority().unwrap().host(), "example.com");
    ///
    /// let uri = Uri::parse("file:///path/to/file")?;
    /// assert_eq!(uri.authority().unwrap().host(), "");
    ///
    /// let uri = Uri::parse("http://[::1]")?;
    /// assert_eq!(uri.authority().unwrap().host(), "[::1]");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn host(&self) -> &'a str {
        self.meta.host.slice(self.val)
    }

    /// Returns the span of the host subcomponent.
    #[must_use]
    pub fn host_span(&self) -> Span {
        self.meta.host
    }

    /// Returns the kind of the host subcomponent.
    #[must_use]
    pub fn host_kind(&self) -> HostKind {
        self.meta.host_meta.kind()
    }

    /// Returns the parsed [host] subcomponent.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::{Ipv4Addr, Ipv6Addr};
    /// use uriref::{component::Host, Uri};
    ///
    /// let uri = Uri::parse("foo://127.0.0.1")?;
    /// assert_eq!(uri.authority().unwrap().host_parsed(), Host::Ipv4(Ipv4Addr::LOCALHOST));
    ///
    /// let uri = Uri::parse("foo://[::1]")?;
    /// assert_eq!(uri.authority().unwrap().host_parsed(), Host::Ipv6(Ipv6Addr::LOCALHOST));
    ///
    /// let uri = Uri::parse("foo://[v1.addr]")?;
    /// assert_eq!(uri.authority().unwrap().host_parsed(), Host::IpvFuture("v1.addr"));
    ///
    /// let uri = Uri::parse("foo://localhost")?;
    /// assert!(matches!(uri.authority().unwrap().host_parsed(), Host::RegName(name) if name == "localhost"));
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn host_parsed(&self) -> Host<'a> {
        match self.meta.host_meta {
            HostMeta::Ipv4(addr) => Host::Ipv4(addr),
            HostMeta::Ipv6(addr) => Host::Ipv6(addr),
            HostMeta::IpvFuture => {
                let host = self.host();
                Host::IpvFuture(&host[1..host.len() - 1])
            }
            HostMeta::RegName => Host::RegName(EStr::new_validated(self.host())),
        }
    }

    /// Returns the optional [port] subcomponent.
    ///
    /// The port is kept verbatim: it may be empty, have leading zeros,
    /// or be larger than [`u16::MAX`].
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{pct_enc::EStr, Uri};
    ///
    /// let uri = Uri::parse("foo://localhost:4673/")?;
    /// assert_eq!(uri.authority().unwrap().port(), Some(EStr::new_or_panic("4673")));
    ///
    /// let uri = Uri::parse("foo://localhost:/")?;
    /// assert_eq!(uri.authority().unwrap().port(), Some(EStr::EMPTY));
    ///
    /// let uri = Uri::parse("foo://localhost/")?;
    /// assert_eq!(uri.authority().unwrap().port(), None);
    ///
    /// let uri = Uri::parse("foo://localhost:123456/")?;
    /// assert_eq!(uri.authority().unwrap().port(), Some(EStr::new_or_panic("123456")));
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn port(&self) -> Option<&'a EStr<Port>> {
        self.meta
            .port
            .map(|span| EStr::new_validated(span.slice(self.val)))
    }

    /// Returns the span of the port subcomponent, if present.
    #[must_use]
    pub fn port_span(&self) -> Option<Span> {
        self.meta.port
    }

    /// Converts the [port] subcomponent to `u16`, if present and nonempty.
    ///
    /// Returns `Ok(None)` if the port is not present or is empty. Leading zeros are ignored.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    ///
    /// # Errors
    ///
    /// Returns `Err` if the port cannot be parsed into `u16`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::parse("foo://localhost:04673/")?;
    /// assert_eq!(uri.authority().unwrap().port_to_u16(), Ok(Some(4673)));
    ///
    /// let uri = Uri::parse("foo://localhost:/")?;
    /// assert_eq!(uri.authority().unwrap().port_to_u16(), Ok(None));
    ///
    /// let uri = Uri::parse("foo://localhost:123456/")?;
    /// assert!(uri.authority().unwrap().port_to_u16().is_err());
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn port_to_u16(&self) -> Result<Option<u16>, ParseIntError> {
        self.port()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str().parse())
            .transpose()
    }

    /// Checks whether a userinfo subcomponent is present.
    #[inline]
    #[must_use]
    pub fn has_userinfo(&self) -> bool {
        self.meta.userinfo.is_some()
    }

    /// Checks whether a port subcomponent is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// // The port subcomponent can be empty.
    /// let uri = Uri::parse("foo://localhost:/")?;
    /// assert!(uri.authority().unwrap().has_port());
    ///
    /// let uri = Uri::parse("foo://localhost/")?;
    /// assert!(!uri.authority().unwrap().has_port());
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn has_port(&self) -> bool {
        self.meta.port.is_some()
    }
}

/// A parsed [host] component.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Host<'a> {
    /// An IPv4 address.
    Ipv4(Ipv4Addr),
    /// An IPv6 address.
    Ipv6(Ipv6Addr),
    /// An IP address of future version, without the enclosing brackets.
    IpvFuture(&'a str),
    /// A registered name.
    ///
    /// Note that ASCII characters within a registered name are *case-insensitive*.
    RegName(&'a EStr<RegName>),
}

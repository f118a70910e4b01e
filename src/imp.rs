#![allow(missing_debug_implementations)]

use crate::{
    component::{Authority, HostKind, Scheme},
    normalize::Normalizer,
    parse::{self, Component, ParseError},
    pct_enc::{
        encoder::{Fragment, Path, Query},
        table, EStr, Split,
    },
    query::{self, QueryPair},
    recompose::Parts,
    reference,
    resolve::{self, ResolveError},
    span::Span,
};
use alloc::{borrow::ToOwned, string::String, vec::Vec};
use borrow_or_share::{BorrowOrShare, Bos};
use core::{
    borrow::Borrow,
    cmp::Ordering,
    fmt, hash,
    net::{Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Parse input of [`Uri::parse`]: `&str` or `String`.
pub trait Parse {
    /// The storage of the parsed URI reference.
    type Val;
    /// The error type.
    type Err;

    /// Parses `self` into a URI reference.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input is not a valid URI reference.
    fn parse(self) -> Result<Uri<Self::Val>, Self::Err>;
}

impl<'a> Parse for &'a str {
    type Val = &'a str;
    type Err = ParseError;

    fn parse(self) -> Result<Uri<&'a str>, ParseError> {
        parse::parse(self.as_bytes()).map(|meta| Uri { val: self, meta })
    }
}

impl Parse for String {
    type Val = Self;
    type Err = (ParseError, Self);

    fn parse(self) -> Result<Uri<String>, (ParseError, String)> {
        match parse::parse(self.as_bytes()) {
            Ok(meta) => Ok(Uri { val: self, meta }),
            Err(e) => Err((e, self)),
        }
    }
}

/// Component spans of a URI reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Meta {
    pub scheme: Option<Span>,
    pub auth: Option<AuthMeta>,
    pub path: Span,
    pub query: Option<Span>,
    pub fragment: Option<Span>,
}

impl Meta {
    /// Returns the end of the reference with its fragment stripped.
    pub fn query_or_path_end(&self) -> usize {
        self.query.map_or(self.path.end(), Span::end)
    }
}

/// Spans of an authority, relative to the whole reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthMeta {
    pub span: Span,
    pub userinfo: Option<Span>,
    pub host: Span,
    pub host_meta: HostMeta,
    pub port: Option<Span>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HostMeta {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    IpvFuture,
    #[default]
    RegName,
}

impl HostMeta {
    pub fn kind(self) -> HostKind {
        match self {
            HostMeta::Ipv4(_) => HostKind::Ipv4,
            HostMeta::Ipv6(_) => HostKind::Ipv6,
            HostMeta::IpvFuture => HostKind::IpvFuture,
            HostMeta::RegName => HostKind::RegName,
        }
    }
}

/// A URI reference, i.e., either a URI or a relative reference.
///
/// # Variants
///
/// Two variants of `Uri` are available: `Uri<&str>` (borrowed) and `Uri<String>` (owned).
///
/// `Uri<&'a str>` outputs references with lifetime `'a` where possible
/// (thanks to [`borrow-or-share`](borrow_or_share)):
///
/// ```
/// use uriref::Uri;
///
/// // Keep a reference to the path after dropping the `Uri`.
/// let path = Uri::parse("foo:bar")?.path();
/// assert_eq!(path, "bar");
/// # Ok::<_, uriref::ParseError>(())
/// ```
///
/// Every transforming operation (resolution, normalization, reference
/// creation, setters) produces a `Uri<String>` with a freshly written buffer.
///
/// # Comparison
///
/// `Uri`s are compared [lexicographically](Ord#lexicographical-comparison)
/// by their byte values. Normalization is **not** performed prior to comparison.
///
/// # Examples
///
/// Parse and extract components from a URI:
///
/// ```
/// use uriref::{
///     component::{Host, Scheme},
///     Uri,
/// };
///
/// const SCHEME_FOO: &Scheme = Scheme::new_or_panic("foo");
///
/// let s = "foo://user@example.com:8042/over/there?name=ferret#nose";
/// let uri = Uri::parse(s)?;
///
/// assert_eq!(uri.scheme().unwrap(), SCHEME_FOO);
///
/// let auth = uri.authority().unwrap();
/// assert_eq!(auth.as_str(), "user@example.com:8042");
/// assert_eq!(auth.userinfo().unwrap(), "user");
/// assert_eq!(auth.host(), "example.com");
/// assert!(matches!(auth.host_parsed(), Host::RegName(name) if name == "example.com"));
/// assert_eq!(auth.port().unwrap(), "8042");
/// assert_eq!(auth.port_to_u16(), Ok(Some(8042)));
///
/// assert_eq!(uri.path(), "/over/there");
/// assert!(uri.path_segments().eq(["over", "there"]));
/// assert_eq!(uri.query().unwrap(), "name=ferret");
/// assert_eq!(uri.fragment().unwrap(), "nose");
/// # Ok::<_, uriref::ParseError>(())
/// ```
///
/// Parse into and convert between `Uri<&str>` and `Uri<String>`:
///
/// ```
/// use uriref::Uri;
///
/// let s = "http://example.com/";
///
/// // Parse into a `Uri<&str>` from a string slice.
/// let uri: Uri<&str> = Uri::parse(s)?;
///
/// // Parse into a `Uri<String>` from an owned string.
/// let uri_owned: Uri<String> = Uri::parse(s.to_owned()).map_err(|e| e.0)?;
///
/// // Convert a `Uri<&str>` to `Uri<String>`.
/// let uri_owned: Uri<String> = uri.to_owned();
///
/// // Borrow a `Uri<String>` as `Uri<&str>`.
/// let uri: Uri<&str> = uri_owned.borrow();
/// # Ok::<_, uriref::ParseError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Uri<T> {
    /// Text of the URI reference.
    pub(crate) val: T,
    /// Component spans.
    /// Should be identical to parser output with `val` as input.
    pub(crate) meta: Meta,
}

impl<T> Uri<T> {
    /// Parses a URI reference from a string into a `Uri`.
    ///
    /// The return type is
    ///
    /// - `Result<Uri<&str>, ParseError>` for `I = &str`;
    /// - `Result<Uri<String>, (ParseError, String)>` for `I = String`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not match the
    /// [`URI-reference`][abnf] ABNF rule from RFC 3986.
    ///
    /// [abnf]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.1
    pub fn parse<I>(input: I) -> Result<Self, I::Err>
    where
        I: Parse<Val = T>,
    {
        input.parse()
    }

    pub(crate) fn from_pair((val, meta): (T, Meta)) -> Self {
        Self { val, meta }
    }
}

impl Uri<String> {
    /// Borrows this `Uri<String>` as `Uri<&str>`.
    #[allow(clippy::should_implement_trait)]
    #[inline]
    #[must_use]
    pub fn borrow(&self) -> Uri<&str> {
        Uri {
            val: &self.val,
            meta: self.meta,
        }
    }

    /// Consumes this `Uri<String>` and yields the underlying [`String`].
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }

    /// Resolves a reference against this URI in place, replacing `self`
    /// with the target URI.
    ///
    /// See [`resolve_against`](Self::resolve_against) for the exact behavior.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `self` has no scheme. `self` is left untouched then.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let mut uri = Uri::parse("http://example.com/a/b").unwrap().to_owned();
    /// uri.resolve_in_place(&Uri::parse("c?d")?).unwrap();
    /// assert_eq!(uri, "http://example.com/a/c?d");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn resolve_in_place<U: Bos<str>>(&mut self, reference: &Uri<U>) -> Result<(), ResolveError> {
        *self = resolve::resolve(&*self, reference)?;
        Ok(())
    }

    /// Normalizes this URI reference in place with the default [`Normalizer`].
    pub fn normalize_in_place(&mut self) {
        Normalizer::new().normalize_in_place(self);
    }

    /// Replaces the query component.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the new query is not a valid query component.
    /// The index of the error is relative to `opt`. `self` is left untouched then.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let mut uri = Uri::parse("http://example.com/?a#f").unwrap().to_owned();
    /// uri.set_query(Some("b=1&c")).unwrap();
    /// assert_eq!(uri, "http://example.com/?b=1&c#f");
    /// assert_eq!(uri.fragment().unwrap(), "f");
    ///
    /// uri.set_query(None).unwrap();
    /// assert_eq!(uri, "http://example.com/#f");
    ///
    /// assert_eq!(uri.set_query(Some("a#b")).unwrap_err().index(), 1);
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn set_query(&mut self, opt: Option<&str>) -> Result<(), ParseError> {
        if let Some(s) = opt {
            parse::validate(s, table::QUERY, Component::Query)?;
        }
        let mut parts = Parts::of(&*self);
        parts.query = opt;
        *self = parts.recompose();
        Ok(())
    }

    /// Replaces the fragment component.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the new fragment is not a valid fragment component.
    /// The index of the error is relative to `opt`. `self` is left untouched then.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let mut uri = Uri::parse("foo:bar").unwrap().to_owned();
    /// uri.set_fragment(Some("baz")).unwrap();
    /// assert_eq!(uri, "foo:bar#baz");
    ///
    /// assert!(uri.set_fragment(Some("%zz")).is_err());
    /// assert_eq!(uri, "foo:bar#baz");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn set_fragment(&mut self, opt: Option<&str>) -> Result<(), ParseError> {
        if let Some(s) = opt {
            parse::validate(s, table::FRAGMENT, Component::Fragment)?;
        }
        // Altering only the fragment does not change the other spans.
        self.val.truncate(self.meta.query_or_path_end());
        self.meta.fragment = None;
        if let Some(s) = opt {
            self.val.reserve_exact(s.len() + 1);
            self.val.push('#');
            let start = self.val.len();
            self.val.push_str(s);
            self.meta.fragment = Some(Span::new(start, self.val.len()));
        }
        Ok(())
    }
}

impl Uri<&str> {
    /// Creates a new `Uri<String>` by cloning the contents of this `Uri<&str>`.
    #[inline]
    #[must_use]
    pub fn to_owned(&self) -> Uri<String> {
        Uri {
            val: self.val.to_owned(),
            meta: self.meta,
        }
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> Uri<T> {
    /// Returns the URI reference as a string slice.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }

    /// Returns the optional [scheme] component.
    ///
    /// Note that the scheme component is *case-insensitive*.
    /// See the documentation of [`Scheme`] for more details on comparison.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{component::Scheme, Uri};
    ///
    /// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert_eq!(uri.scheme(), Some(SCHEME_HTTP));
    ///
    /// let uri = Uri::parse("/path/to/file")?;
    /// assert_eq!(uri.scheme(), None);
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn scheme(&'i self) -> Option<&'o Scheme> {
        let span = self.meta.scheme?;
        Some(Scheme::new_validated(span.slice(self.as_str())))
    }

    /// Returns the optional [authority] component.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    #[must_use]
    pub fn authority(&'i self) -> Option<Authority<'o>> {
        let meta = self.meta.auth?;
        Some(Authority::new(self.as_str(), meta))
    }

    /// Returns the [path] component.
    ///
    /// The path component is always present, although it may be empty.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert_eq!(uri.path(), "/");
    ///
    /// let uri = Uri::parse("mailto:user@example.com")?;
    /// assert_eq!(uri.path(), "user@example.com");
    ///
    /// let uri = Uri::parse("?lang=en")?;
    /// assert_eq!(uri.path(), "");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn path(&'i self) -> &'o EStr<Path> {
        EStr::new_validated(self.meta.path.slice(self.as_str()))
    }

    /// Returns an iterator over the path segments.
    ///
    /// See [`EStr::segments`] for the exact behavior.
    pub fn path_segments(&'i self) -> Split<'o, Path> {
        self.path().segments()
    }

    /// Returns the optional [query] component, without the leading `'?'`.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{pct_enc::EStr, Uri};
    ///
    /// let uri = Uri::parse("http://example.com/?lang=en")?;
    /// assert_eq!(uri.query(), Some(EStr::new_or_panic("lang=en")));
    ///
    /// let uri = Uri::parse("http://example.com/?")?;
    /// assert_eq!(uri.query(), Some(EStr::EMPTY));
    ///
    /// let uri = Uri::parse("ftp://192.0.2.1/")?;
    /// assert_eq!(uri.query(), None);
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn query(&'i self) -> Option<&'o EStr<Query>> {
        let span = self.meta.query?;
        Some(EStr::new_validated(span.slice(self.as_str())))
    }

    /// Returns the optional [fragment] component, without the leading `'#'`.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{pct_enc::EStr, Uri};
    ///
    /// let uri = Uri::parse("http://example.com/#usage")?;
    /// assert_eq!(uri.fragment(), Some(EStr::new_or_panic("usage")));
    ///
    /// let uri = Uri::parse("http://example.com/#")?;
    /// assert_eq!(uri.fragment(), Some(EStr::EMPTY));
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert_eq!(uri.fragment(), None);
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn fragment(&'i self) -> Option<&'o EStr<Fragment>> {
        let span = self.meta.fragment?;
        Some(EStr::new_validated(span.slice(self.as_str())))
    }

    /// Returns the URI reference with its fragment stripped, as a string slice.
    #[must_use]
    pub fn strip_fragment(&'i self) -> Uri<&'o str> {
        let mut meta = self.meta;
        meta.fragment = None;
        Uri {
            val: &self.as_str()[..self.meta.query_or_path_end()],
            meta,
        }
    }
}

impl<T: Bos<str>> Uri<T> {
    /// Returns the span of the scheme component, if present.
    #[must_use]
    pub fn scheme_span(&self) -> Option<Span> {
        self.meta.scheme
    }

    /// Returns the span of the authority component, if present.
    ///
    /// The leading `"//"` is not included.
    #[must_use]
    pub fn authority_span(&self) -> Option<Span> {
        self.meta.auth.map(|auth| auth.span)
    }

    /// Returns the span of the path component.
    #[must_use]
    pub fn path_span(&self) -> Span {
        self.meta.path
    }

    /// Returns an iterator over the spans of the path segments.
    ///
    /// The spans denote the same segments as [`path_segments`](Self::path_segments).
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{Span, Uri};
    ///
    /// let uri = Uri::parse("/a/bc")?;
    /// assert!(uri.path_segment_spans().eq([Span::new(1, 2), Span::new(3, 5)]));
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn path_segment_spans(&self) -> impl Iterator<Item = Span> + '_ {
        let path = self.meta.path;
        let mut start = path.start() + usize::from(self.path().is_absolute());
        self.path_segments().map(move |seg| {
            let span = Span::new(start, start + seg.len());
            start = span.end() + 1;
            span
        })
    }

    /// Returns the span of the query component, if present.
    ///
    /// The leading `'?'` is not included.
    #[must_use]
    pub fn query_span(&self) -> Option<Span> {
        self.meta.query
    }

    /// Returns the span of the fragment component, if present.
    ///
    /// The leading `'#'` is not included.
    #[must_use]
    pub fn fragment_span(&self) -> Option<Span> {
        self.meta.fragment
    }

    /// Checks whether a scheme component is present.
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.meta.scheme.is_some()
    }

    /// Checks whether the URI reference is a [relative reference],
    /// i.e., without a scheme.
    ///
    /// [relative reference]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.2
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.meta.scheme.is_none()
    }

    /// Checks whether the path is absolute, i.e., starting with `'/'`.
    #[must_use]
    pub fn absolute_path(&self) -> bool {
        self.path().is_absolute()
    }

    /// Checks whether an authority component is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// assert!(Uri::parse("http://example.com/")?.has_authority());
    /// assert!(!Uri::parse("mailto:user@example.com")?.has_authority());
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.meta.auth.is_some()
    }

    /// Checks whether a query component is present.
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.meta.query.is_some()
    }

    /// Checks whether a fragment component is present.
    #[must_use]
    pub fn has_fragment(&self) -> bool {
        self.meta.fragment.is_some()
    }

    /// Creates a new URI reference by replacing the fragment component of `self` with the given one.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `opt` is not a valid fragment component.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/#old")?;
    /// assert_eq!(uri.with_fragment(Some("new"))?, "http://example.com/#new");
    /// assert_eq!(uri.with_fragment(None)?, "http://example.com/");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn with_fragment(&self, opt: Option<&str>) -> Result<Uri<String>, ParseError> {
        let mut uri = self.strip_fragment().to_owned();
        uri.set_fragment(opt)?;
        Ok(uri)
    }

    /// Resolves the URI reference against the given base URI
    /// and returns the target URI.
    ///
    /// This method applies the reference resolution algorithm defined in
    /// [Section 5 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5),
    /// strictly. A leading `".."` with nothing left to remove is dropped
    /// silently; use a [`Resolver`] to report it instead.
    ///
    /// [`Resolver`]: crate::resolve::Resolver
    ///
    /// # Errors
    ///
    /// Returns `Err` if `base` has no scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let base = Uri::parse("http://example.com/foo/bar")?;
    ///
    /// assert_eq!(Uri::parse("baz")?.resolve_against(&base).unwrap(), "http://example.com/foo/baz");
    /// assert_eq!(Uri::parse("../baz")?.resolve_against(&base).unwrap(), "http://example.com/baz");
    /// assert_eq!(Uri::parse("?baz")?.resolve_against(&base).unwrap(), "http://example.com/foo/bar?baz");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn resolve_against<U: Bos<str>>(&self, base: &Uri<U>) -> Result<Uri<String>, ResolveError> {
        resolve::resolve(base, self)
    }

    /// Creates a reference that resolves against `base` to `self`.
    ///
    /// See [`create_reference`](reference::create_reference) for the exact behavior.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `self` cannot be expressed relative to `base`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let base = Uri::parse("http://example.com/a/b/c")?;
    /// let target = Uri::parse("http://example.com/a/x")?;
    /// assert_eq!(target.make_relative_to(&base, false).unwrap(), "../x");
    /// assert_eq!(target.make_relative_to(&base, true).unwrap(), "/a/x");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn make_relative_to<U: Bos<str>>(
        &self,
        base: &Uri<U>,
        domain_root: bool,
    ) -> Result<Uri<String>, ResolveError> {
        reference::create_reference(self, base, domain_root)
    }

    /// Normalizes the URI reference with the default [`Normalizer`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Uri;
    ///
    /// let uri = Uri::parse("HTTP://EXAMPLE.com:80/%7euser/./a/../b")?;
    /// assert_eq!(uri.normalize(), "http://example.com/~user/b");
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Uri<String> {
        Normalizer::new().normalize(self)
    }

    /// Decodes the query component into key-value pairs.
    ///
    /// Returns an empty vector if the query is absent.
    /// See [`decode_query`](query::decode_query) for the exact behavior.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{query::QueryPair, Uri};
    ///
    /// let uri = Uri::parse("http://example.com/?a=1&b")?;
    /// assert_eq!(uri.query_pairs(), [QueryPair::new("a", Some("1")), QueryPair::new("b", None)]);
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    #[must_use]
    pub fn query_pairs(&self) -> Vec<QueryPair> {
        self.query()
            .map(|q| query::decode_query(q.as_str()))
            .unwrap_or_default()
    }
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<Uri<U>> for Uri<T> {
    fn eq(&self, other: &Uri<U>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<str> for Uri<T> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for str {
    fn eq(&self, other: &Uri<T>) -> bool {
        self == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<&str> for Uri<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for &str {
    fn eq(&self, other: &Uri<T>) -> bool {
        *self == other.as_str()
    }
}

impl<T: Bos<str>> Eq for Uri<T> {}

impl<T: Bos<str>> hash::Hash for Uri<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<T: Bos<str>> PartialOrd for Uri<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bos<str>> Ord for Uri<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<T: Bos<str>> AsRef<str> for Uri<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T: Bos<str>> Borrow<str> for Uri<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<'a> TryFrom<&'a str> for Uri<&'a str> {
    type Error = ParseError;

    #[inline]
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl TryFrom<String> for Uri<String> {
    type Error = (ParseError, String);

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl<'a> From<Uri<&'a str>> for &'a str {
    #[inline]
    fn from(value: Uri<&'a str>) -> &'a str {
        value.val
    }
}

impl From<Uri<String>> for String {
    #[inline]
    fn from(value: Uri<String>) -> String {
        value.val
    }
}

impl From<Uri<&str>> for Uri<String> {
    #[inline]
    fn from(value: Uri<&str>) -> Self {
        value.to_owned()
    }
}

impl FromStr for Uri<String> {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s).map(|r| r.to_owned())
    }
}

impl<T: Bos<str>> fmt::Debug for Uri<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme())
            .field("authority", &self.authority())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl<T: Bos<str>> fmt::Display for Uri<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

#[cfg(feature = "serde")]
impl<T: Bos<str>> Serialize for Uri<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<&'de str> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        Uri::parse(s).map_err(|e| {
            de::Error::custom(format_args!("failed to parse {s:?} as URI reference: {e}"))
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse(s).map_err(|(e, s)| {
            de::Error::custom(format_args!("failed to parse {s:?} as URI reference: {e}"))
        })
    }
}

//! Module for reference resolution.

use crate::{
    imp::Uri,
    recompose::{AuthParts, Parts},
};
use alloc::string::String;
use borrow_or_share::Bos;

/// An error occurred when resolving or creating a URI reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// The base has no scheme.
    RelativeBase,
    /// An underflow occurred in path resolution.
    ///
    /// Only reported when a [`Resolver`] disallows it.
    PathUnderflow,
    /// The target and the base do not have the same scheme,
    /// or either of them has none.
    SchemeMismatch,
    /// The target cannot be reached from the base by a relative reference:
    /// only one of them has an authority, or the target has a rootless
    /// path outside the base directory.
    StructuralMismatch,
}

#[cfg(feature = "impl-error")]
impl crate::Error for ResolveError {}

/// A configurable URI reference resolver.
///
/// # Examples
///
/// ```
/// use uriref::{resolve::Resolver, Uri};
///
/// let base = Uri::parse("http://example.com/foo/bar")?;
/// let resolver = Resolver::new();
///
/// assert_eq!(resolver.resolve(&base, &Uri::parse("baz")?).unwrap(), "http://example.com/foo/baz");
/// assert_eq!(resolver.resolve(&base, &Uri::parse("../baz")?).unwrap(), "http://example.com/baz");
/// assert_eq!(resolver.resolve(&base, &Uri::parse("?baz")?).unwrap(), "http://example.com/foo/bar?baz");
/// # Ok::<_, uriref::ParseError>(())
/// ```
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Resolver {
    allow_path_underflow: bool,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Creates a new `Resolver` with default configuration.
    pub fn new() -> Self {
        Self {
            allow_path_underflow: true,
        }
    }

    /// Sets whether to allow underflow in path resolution.
    ///
    /// This defaults to `true`, in which case a `".."` segment with nothing
    /// left to remove is dropped. A value of `false` is a deviation from the
    /// reference resolution algorithm defined in
    /// [Section 5 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5).
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{resolve::{Resolver, ResolveError}, Uri};
    ///
    /// let base = Uri::parse("http://example.com/foo/bar")?;
    /// let resolver = Resolver::new().allow_path_underflow(false);
    ///
    /// assert_eq!(resolver.resolve(&base, &Uri::parse("../baz")?).unwrap(), "http://example.com/baz");
    /// assert_eq!(resolver.resolve(&base, &Uri::parse("../../baz")?).unwrap_err(), ResolveError::PathUnderflow);
    /// assert_eq!(resolver.resolve(&base, &Uri::parse("/../baz")?).unwrap_err(), ResolveError::PathUnderflow);
    /// # Ok::<_, uriref::ParseError>(())
    /// ```
    pub fn allow_path_underflow(mut self, value: bool) -> Self {
        self.allow_path_underflow = value;
        self
    }

    /// Resolves a reference against a base URI.
    ///
    /// See [`Uri::resolve_against`] for the exact behavior of this method.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the base has no scheme, or if an underflow occurred
    /// in path resolution when [`allow_path_underflow`] is set to `false`.
    ///
    /// [`allow_path_underflow`]: Self::allow_path_underflow
    pub fn resolve<T: Bos<str>, U: Bos<str>>(
        &self,
        base: &Uri<T>,
        reference: &Uri<U>,
    ) -> Result<Uri<String>, ResolveError> {
        resolve_with(base, reference, self.allow_path_underflow)
    }

    /// Resolves a reference against a base URI in place, replacing the base
    /// with the target URI.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`resolve`](Self::resolve).
    /// `base` is left untouched then.
    pub fn resolve_in_place<U: Bos<str>>(
        &self,
        base: &mut Uri<String>,
        reference: &Uri<U>,
    ) -> Result<(), ResolveError> {
        *base = self.resolve(&*base, reference)?;
        Ok(())
    }
}

/// Resolves a reference against a base URI, allowing path underflow.
///
/// # Errors
///
/// Returns `Err` if the base has no scheme.
///
/// # Examples
///
/// ```
/// use uriref::{resolve::resolve, Uri};
///
/// let base = Uri::parse("http://a/b/c/d;p?q")?;
/// let target = resolve(&base, &Uri::parse("../../../g")?).unwrap();
/// assert_eq!(target, "http://a/g");
///
/// // An empty reference yields the base without fragment.
/// let base = Uri::parse("http://a/b#f")?;
/// assert_eq!(resolve(&base, &Uri::parse("")?).unwrap(), "http://a/b");
/// # Ok::<_, uriref::ParseError>(())
/// ```
pub fn resolve<T: Bos<str>, U: Bos<str>>(
    base: &Uri<T>,
    reference: &Uri<U>,
) -> Result<Uri<String>, ResolveError> {
    resolve_with(base, reference, true)
}

fn resolve_with<T: Bos<str>, U: Bos<str>>(
    base: &Uri<T>,
    /* reference */ r: &Uri<U>,
    allow_path_underflow: bool,
) -> Result<Uri<String>, ResolveError> {
    let Some(base_scheme) = base.scheme() else {
        debug!("cannot resolve against relative base {:?}", base.as_str());
        return Err(ResolveError::RelativeBase);
    };

    let r_path = r.path().as_str();
    let base_path = base.path().as_str();
    let path_buf: String;

    let mut t = Parts {
        scheme: Some(base_scheme.as_str()),
        authority: base.meta.auth.map(|meta| AuthParts::of(base.as_str(), meta)),
        path: "",
        query: r.query().map(|s| s.as_str()),
        fragment: r.fragment().map(|s| s.as_str()),
    };

    if let Some(r_scheme) = r.scheme() {
        trace!("reference has a scheme");
        t.scheme = Some(r_scheme.as_str());
        t.authority = r.meta.auth.map(|meta| AuthParts::of(r.as_str(), meta));
        path_buf = remove_dot_segments_with(r_path, allow_path_underflow)?;
        t.path = &path_buf;
    } else if let Some(meta) = r.meta.auth {
        trace!("reference has an authority");
        t.authority = Some(AuthParts::of(r.as_str(), meta));
        path_buf = remove_dot_segments_with(r_path, allow_path_underflow)?;
        t.path = &path_buf;
    } else if r_path.is_empty() {
        trace!("reference has an empty path");
        t.path = base_path;
        if !r.has_query() {
            t.query = base.query().map(|s| s.as_str());
        }
    } else if r_path.starts_with('/') {
        trace!("reference has an absolute path");
        path_buf = remove_dot_segments_with(r_path, allow_path_underflow)?;
        t.path = &path_buf;
    } else {
        trace!("merging reference path with base path");
        let merged = merge(base.has_authority(), base_path, r_path);
        path_buf = remove_dot_segments_with(&merged, allow_path_underflow)?;
        t.path = &path_buf;
    }

    Ok(t.recompose())
}

/// Merges a relative-path reference with the base path.
fn merge(base_has_authority: bool, base_path: &str, r_path: &str) -> String {
    let dir = if base_has_authority && base_path.is_empty() {
        "/"
    } else {
        base_path.rfind('/').map_or("", |i| &base_path[..=i])
    };
    [dir, r_path].concat()
}

/// Removes dot segments from a path, as defined in
/// [Section 5.2.4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4).
///
/// Only the literal segments `"."` and `".."` are dot segments;
/// percent-encoded dots are left alone. A `".."` with nothing left
/// to remove is dropped.
///
/// # Examples
///
/// ```
/// use uriref::resolve::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// assert_eq!(remove_dot_segments("/a/b/../c"), "/a/c");
/// assert_eq!(remove_dot_segments("../a"), "a");
/// assert_eq!(remove_dot_segments("/.."), "/");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    // Underflow is allowed, so this cannot fail.
    let _ = remove_dot_segments_into(&mut out, path, true);
    out
}

pub(crate) fn remove_dot_segments_with(
    path: &str,
    allow_path_underflow: bool,
) -> Result<String, ResolveError> {
    let mut out = String::with_capacity(path.len());
    remove_dot_segments_into(&mut out, path, allow_path_underflow)?;
    Ok(out)
}

fn remove_dot_segments_into(
    out: &mut String,
    path: &str,
    allow_path_underflow: bool,
) -> Result<(), ResolveError> {
    let mut input = path;

    while !input.is_empty() {
        if let Some(rem) = input.strip_prefix("../") {
            input = rem;
        } else if let Some(rem) = input.strip_prefix("./") {
            input = rem;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            pop_segment(out, allow_path_underflow)?;
        } else if input == "/.." {
            input = "/";
            pop_segment(out, allow_path_underflow)?;
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let start = usize::from(input.starts_with('/'));
            let end = input[start..].find('/').map_or(input.len(), |i| i + start);
            out.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    Ok(())
}

/// Removes the last segment and its preceding `'/'` (if any) from the output.
fn pop_segment(out: &mut String, allow_path_underflow: bool) -> Result<(), ResolveError> {
    if out.is_empty() {
        if allow_path_underflow {
            return Ok(());
        }
        debug!("path underflow");
        return Err(ResolveError::PathUnderflow);
    }
    out.truncate(out.rfind('/').unwrap_or(0));
    Ok(())
}

//! Relative reference creation, the inverse of reference resolution.

use crate::{
    imp::Uri,
    recompose::{AuthParts, Parts},
    resolve::{self, ResolveError},
};
use alloc::{string::String, vec::Vec};
use borrow_or_share::Bos;

/// Creates a reference that resolves against `base` to `target`.
///
/// The returned reference is as short as the following rules make it:
///
/// - If the authorities differ in text, a network-path reference
///   (`//authority/path?query#fragment`) is returned.
/// - If the paths are equal, the path is dropped, and so is the query
///   when it is equal to that of the base.
/// - Otherwise, with `domain_root` set to `false`, the path is expressed
///   relative to the base directory: the common leading directory segments
///   are dropped, one `".."` is emitted for each remaining base directory
///   segment, followed by the remaining target segments. With `domain_root`
///   set to `true`, the target's absolute path is emitted instead.
///
/// The fragment of `target` is always kept.
///
/// Resolving the returned reference against `base` yields `target` whenever
/// the target path has no dot segments, except that the scheme comes out in
/// the letter case of the base scheme. Dot segments in the base path are
/// accounted for.
///
/// # Errors
///
/// Returns [`ResolveError::SchemeMismatch`] if either URI has no scheme or
/// the schemes differ (case-insensitively), and
/// [`ResolveError::StructuralMismatch`] if only one of them has an authority
/// or the target cannot otherwise be reached by a relative reference.
///
/// # Examples
///
/// ```
/// use uriref::{reference::create_reference, resolve::ResolveError, Uri};
///
/// let base = Uri::parse("http://h/a/b/c")?;
///
/// let target = Uri::parse("http://h/a/x")?;
/// let r = create_reference(&target, &base, false).unwrap();
/// assert_eq!(r, "../x");
/// assert_eq!(r.resolve_against(&base).unwrap(), target);
///
/// let target = Uri::parse("http://other/a/x")?;
/// assert_eq!(create_reference(&target, &base, false).unwrap(), "//other/a/x");
///
/// let target = Uri::parse("ftp://h/a/x")?;
/// assert_eq!(create_reference(&target, &base, false), Err(ResolveError::SchemeMismatch));
/// # Ok::<_, uriref::ParseError>(())
/// ```
pub fn create_reference<T: Bos<str>, U: Bos<str>>(
    target: &Uri<T>,
    base: &Uri<U>,
    domain_root: bool,
) -> Result<Uri<String>, ResolveError> {
    let (Some(t_scheme), Some(b_scheme)) = (target.scheme(), base.scheme()) else {
        debug!("cannot create a reference between URIs without a scheme");
        return Err(ResolveError::SchemeMismatch);
    };
    if t_scheme != b_scheme {
        debug!("schemes differ: {:?} and {:?}", t_scheme.as_str(), b_scheme.as_str());
        return Err(ResolveError::SchemeMismatch);
    }

    let network_path = Parts {
        scheme: None,
        authority: target
            .meta
            .auth
            .map(|meta| AuthParts::of(target.as_str(), meta)),
        path: target.path().as_str(),
        query: target.query().map(|s| s.as_str()),
        fragment: target.fragment().map(|s| s.as_str()),
    };

    match (target.authority(), base.authority()) {
        (Some(t_auth), Some(b_auth)) => {
            if t_auth.as_str() != b_auth.as_str() {
                trace!("authorities differ, creating a network-path reference");
                return Ok(network_path.recompose());
            }
        }
        (None, None) => {}
        _ => {
            debug!("only one of target and base has an authority");
            return Err(ResolveError::StructuralMismatch);
        }
    }

    let t_path = target.path().as_str();
    let b_path = base.path().as_str();

    let mut r = Parts {
        authority: None,
        ..network_path
    };

    if t_path == b_path {
        if target.query() == base.query() {
            r.path = "";
            r.query = None;
            return Ok(r.recompose());
        }
        if target.has_query() {
            r.path = "";
            return Ok(r.recompose());
        }
        // The base query must go, so the path has to be written.
    }

    let path_buf: String;
    match relative_path(t_path, b_path, base.has_authority(), domain_root) {
        Some(RelPath::Borrowed(path)) => r.path = path,
        Some(RelPath::Owned(path)) => {
            path_buf = path;
            r.path = &path_buf;
        }
        None if target.has_authority() => {
            trace!("no relative path reaches {:?}, creating a network-path reference", t_path);
            return Ok(network_path.recompose());
        }
        None => {
            debug!("{:?} cannot be reached from {:?}", t_path, b_path);
            return Err(ResolveError::StructuralMismatch);
        }
    }
    Ok(r.recompose())
}

enum RelPath<'a> {
    Borrowed(&'a str),
    Owned(String),
}

/// Computes a non-empty relative path that resolves against `b_path` to `t_path`.
fn relative_path<'a>(
    t_path: &'a str,
    b_path: &str,
    base_has_authority: bool,
    domain_root: bool,
) -> Option<RelPath<'a>> {
    if t_path.is_empty() || t_path.starts_with("//") {
        // Not expressible as a relative path.
        return None;
    }

    // Resolution merges against the base directory and then removes dot
    // segments, so only the directory left after removal counts.
    let base_dir = if base_has_authority && b_path.is_empty() {
        String::from("/")
    } else {
        resolve::remove_dot_segments(b_path.rfind('/').map_or("", |i| &b_path[..=i]))
    };

    let t_absolute = t_path.starts_with('/');
    if t_absolute && (domain_root || !b_path.starts_with('/')) {
        return Some(RelPath::Borrowed(t_path));
    }

    if let Some(rest) = t_path.strip_prefix(base_dir.as_str()) {
        return Some(if rest.is_empty() {
            RelPath::Borrowed(".")
        } else if rest.starts_with('/') {
            RelPath::Owned(["./", rest].concat())
        } else {
            RelPath::Borrowed(rest)
        });
    }

    if !t_absolute {
        return None;
    }

    // Both paths are absolute from here on.
    let b_dirs: Vec<&str> = match base_dir.strip_prefix('/').and_then(|d| d.strip_suffix('/')) {
        Some(dirs) => dirs.split('/').collect(),
        None => Vec::new(),
    };
    let t_segs: Vec<&str> = t_path[1..].split('/').collect();
    let t_dirs = &t_segs[..t_segs.len() - 1];

    let common = b_dirs
        .iter()
        .zip(t_dirs)
        .take_while(|(b, t)| b == t)
        .count();

    let mut path = "../".repeat(b_dirs.len() - common);
    path.push_str(&t_segs[common..].join("/"));
    Some(RelPath::Owned(path))
}

#[cfg(test)]
mod tests {
    use super::{relative_path, RelPath};

    fn rel(t: &str, b: &str) -> Option<alloc::string::String> {
        relative_path(t, b, true, false).map(|p| match p {
            RelPath::Borrowed(s) => s.into(),
            RelPath::Owned(s) => s,
        })
    }

    #[test]
    fn relative_paths() {
        assert_eq!(rel("/a/x", "/a/b/c").as_deref(), Some("../x"));
        assert_eq!(rel("/a/b/x", "/a/b/c").as_deref(), Some("x"));
        assert_eq!(rel("/a/b/", "/a/b/c").as_deref(), Some("."));
        assert_eq!(rel("/a/", "/a/b/c").as_deref(), Some("../"));
        assert_eq!(rel("/x/y", "/a/b/c").as_deref(), Some("../../x/y"));
        assert_eq!(rel("/a/b//x", "/a/b/c").as_deref(), Some(".//x"));
        assert_eq!(rel("/a//x", "/a/b/c").as_deref(), Some("..//x"));
        assert_eq!(rel("/x", "").as_deref(), Some("x"));
        assert_eq!(rel("/a/x", "/a/./b/c").as_deref(), Some("../x"));
        assert_eq!(rel("/a/x", "/a/b/../c").as_deref(), Some("x"));
        assert_eq!(rel("/a/x", "/a/b/..").as_deref(), Some("../x"));
        assert_eq!(rel("", "/a"), None);
        assert_eq!(rel("//x", "/a"), None);
    }
}

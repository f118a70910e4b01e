use uriref::{reference::create_reference, resolve::ResolveError, Uri};

trait Test {
    fn route(&self, target: &str, expected: &str);
    fn route_root(&self, target: &str, expected: &str);
    fn fail(&self, target: &str, err: ResolveError);
}

impl Test for Uri<&str> {
    #[track_caller]
    fn route(&self, target: &str, expected: &str) {
        let target = Uri::parse(target).unwrap();
        let r = create_reference(&target, self, false).unwrap();
        assert_eq!(r, expected);
        assert!(r.scheme().is_none());
        assert_eq!(r.resolve_against(self).unwrap(), target);
        assert_eq!(target.make_relative_to(self, false).unwrap(), expected);
    }

    #[track_caller]
    fn route_root(&self, target: &str, expected: &str) {
        let target = Uri::parse(target).unwrap();
        let r = create_reference(&target, self, true).unwrap();
        assert_eq!(r, expected);
        assert_eq!(r.resolve_against(self).unwrap(), target);
    }

    #[track_caller]
    fn fail(&self, target: &str, expected: ResolveError) {
        let target = Uri::parse(target).unwrap();
        for domain_root in [true, false] {
            assert_eq!(
                create_reference(&target, self, domain_root).unwrap_err(),
                expected
            );
        }
    }
}

#[test]
fn relative_paths() {
    let base = Uri::parse("http://h/a/b/c").unwrap();

    base.route("http://h/a/x", "../x");
    base.route("http://h/a/b/x", "x");
    base.route("http://h/a/b/", ".");
    base.route("http://h/a/", "../");
    base.route("http://h/x/y", "../../x/y");
    base.route("http://h/", "../../");
    base.route("http://h/a/b/c/d", "c/d");
    base.route("http://h/a/b/x?q", "x?q");
    base.route("http://h/a/b/x#f", "x#f");
    base.route("http://h/a/b/x:y", "./x:y");
    base.route("http://h/a/b//x", ".//x");
}

#[test]
fn same_path() {
    let base = Uri::parse("http://h/a/b?q").unwrap();

    base.route("http://h/a/b?q", "");
    base.route("http://h/a/b?q#f", "#f");
    base.route("http://h/a/b?r", "?r");
    base.route("http://h/a/b?", "?");
    // The base query cannot be dropped by an empty path.
    base.route("http://h/a/b", "b");

    let base = Uri::parse("http://h/a/").unwrap();
    base.route("http://h/a/?q", "?q");
    base.route("http://h/a/", "");
    base.route("http://h/a/#", "#");
}

#[test]
fn dotted_base() {
    let base = Uri::parse("http://h/a/./b/c").unwrap();
    base.route("http://h/a/x", "../x");
    base.route("http://h/a/b/x", "x");
    base.route("http://h/y", "../../y");

    let base = Uri::parse("http://h/a/b/../c").unwrap();
    base.route("http://h/a/x", "x");
    base.route("http://h/a/b/x", "b/x");
    base.route("http://h/x", "../x");

    let base = Uri::parse("http://h/a/b/..").unwrap();
    base.route("http://h/a/x", "../x");
    base.route("http://h/a/b/x", "x");

    let base = Uri::parse("http://h/../a/c").unwrap();
    base.route("http://h/a/x", "x");
    base.route_root("http://h/a/x", "/a/x");

    let base = Uri::parse("foo:./a/b").unwrap();
    base.route("foo:a/x", "x");
}

#[test]
fn network_path() {
    let base = Uri::parse("http://h/a/b").unwrap();

    base.route("http://other/a/b", "//other/a/b");
    base.route("http://u@h/a/b", "//u@h/a/b");
    base.route("http://h:8080/a/b", "//h:8080/a/b");
    base.route("http://H/a/b?q#f", "//H/a/b?q#f");

    // An empty target path is only reachable with the authority.
    base.route("http://h", "//h");
    base.route("http://h?q", "//h?q");
}

#[test]
fn domain_root() {
    let base = Uri::parse("http://h/a/b/c").unwrap();

    base.route_root("http://h/a/x", "/a/x");
    base.route_root("http://h/", "/");
    base.route_root("http://h/a/b/c?q", "?q");
    base.route_root("http://h/a/b/c", "");
    base.route_root("http://other/a/x", "//other/a/x");
    base.route_root("http://h//x", "//h//x");
}

#[test]
fn no_authority() {
    let base = Uri::parse("foo:a/b/c").unwrap();
    base.route("foo:a/b/x", "x");
    base.route("foo:a/b/", ".");
    base.route("foo:a/b/c#f", "#f");
    base.route("foo:/x", "/x");
    base.fail("foo:x", ResolveError::StructuralMismatch);
    base.fail("foo:", ResolveError::StructuralMismatch);

    let base = Uri::parse("foo:/a/b").unwrap();
    base.route("foo:/x/y", "../x/y");
    base.route("foo:/a/y", "y");
    base.fail("foo:x", ResolveError::StructuralMismatch);
}

#[test]
fn mismatch() {
    let base = Uri::parse("http://h/a/b").unwrap();

    base.fail("https://h/a/b", ResolveError::SchemeMismatch);
    base.fail("//h/a/b", ResolveError::SchemeMismatch);
    base.fail("http:/a/b", ResolveError::StructuralMismatch);
    base.fail("http:a/b", ResolveError::StructuralMismatch);

    let base = Uri::parse("/a/b").unwrap();
    base.fail("/a/c", ResolveError::SchemeMismatch);

    // The scheme is checked first.
    let base = Uri::parse("file:/a/b").unwrap();
    base.fail("http://h/a/b", ResolveError::SchemeMismatch);
}

#[test]
fn scheme_case() {
    let base = Uri::parse("HTTP://h/a/b").unwrap();
    let target = Uri::parse("http://h/a/x").unwrap();
    assert_eq!(create_reference(&target, &base, false).unwrap(), "x");

    // The reference resolves back with the scheme of the base.
    let r = create_reference(&target, &base, false).unwrap();
    assert_eq!(r.resolve_against(&base).unwrap(), "HTTP://h/a/x");

    let target = Uri::parse("HTTP://other").unwrap();
    assert_eq!(create_reference(&target, &base, false).unwrap(), "//other");
}

use uriref::{
    resolve::{remove_dot_segments, resolve, ResolveError, Resolver},
    Uri,
};

trait Test {
    fn pass(&self, r: &str, res: &str);
    fn fail(&self, r: &str, err: ResolveError);
}

impl Test for Uri<&str> {
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        let r = Uri::parse(r).unwrap();
        let res = resolve(self, &r).unwrap();
        assert_eq!(res, expected);
        assert_eq!(r.resolve_against(self).unwrap(), expected);

        let mut base = self.to_owned();
        base.resolve_in_place(&r).unwrap();
        assert_eq!(base, expected);

        // The output always parses back into itself.
        assert_eq!(Uri::parse(res.as_str()).unwrap(), res);
    }

    #[track_caller]
    fn fail(&self, r: &str, expected: ResolveError) {
        let r = Uri::parse(r).unwrap();
        for b in [true, false] {
            let resolver = Resolver::new().allow_path_underflow(b);
            assert_eq!(resolver.resolve(self, &r).unwrap_err(), expected);
        }
    }
}

#[test]
fn resolve_normal() {
    // Examples from Section 5.4.1 of RFC 3986.
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    base.pass("g:h", "g:h");
    base.pass("g", "http://a/b/c/g");
    base.pass("./g", "http://a/b/c/g");
    base.pass("g/", "http://a/b/c/g/");
    base.pass("/g", "http://a/g");
    base.pass("//g", "http://g");
    base.pass("?y", "http://a/b/c/d;p?y");
    base.pass("g?y", "http://a/b/c/g?y");
    base.pass("#s", "http://a/b/c/d;p?q#s");
    base.pass("g#s", "http://a/b/c/g#s");
    base.pass("g?y#s", "http://a/b/c/g?y#s");
    base.pass(";x", "http://a/b/c/;x");
    base.pass("g;x", "http://a/b/c/g;x");
    base.pass("g;x?y#s", "http://a/b/c/g;x?y#s");
    base.pass("", "http://a/b/c/d;p?q");
    base.pass(".", "http://a/b/c/");
    base.pass("./", "http://a/b/c/");
    base.pass("..", "http://a/b/");
    base.pass("../", "http://a/b/");
    base.pass("../g", "http://a/b/g");
    base.pass("../..", "http://a/");
    base.pass("../../", "http://a/");
    base.pass("../../g", "http://a/g");
}

#[test]
fn resolve_abnormal() {
    // Examples from Section 5.4.2 of RFC 3986.
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    base.pass("../../../g", "http://a/g");
    base.pass("../../../../g", "http://a/g");

    base.pass("/./g", "http://a/g");
    base.pass("/../g", "http://a/g");
    base.pass("g.", "http://a/b/c/g.");
    base.pass(".g", "http://a/b/c/.g");
    base.pass("g..", "http://a/b/c/g..");
    base.pass("..g", "http://a/b/c/..g");

    base.pass("./../g", "http://a/b/g");
    base.pass("./g/.", "http://a/b/c/g/");
    base.pass("g/./h", "http://a/b/c/g/h");
    base.pass("g/../h", "http://a/b/c/h");
    base.pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
    base.pass("g;x=1/../y", "http://a/b/c/y");

    base.pass("g?y/./x", "http://a/b/c/g?y/./x");
    base.pass("g?y/../x", "http://a/b/c/g?y/../x");
    base.pass("g#s/./x", "http://a/b/c/g#s/./x");
    base.pass("g#s/../x", "http://a/b/c/g#s/../x");

    // Strict parsers keep the scheme of the reference.
    base.pass("http:g", "http:g");
}

#[test]
fn resolve_edge_cases() {
    // Empty base path with an authority.
    let base = Uri::parse("http://a").unwrap();
    base.pass("g", "http://a/g");
    base.pass("", "http://a");
    base.pass("?q", "http://a?q");

    // Base without an authority.
    let base = Uri::parse("foo:a/b").unwrap();
    base.pass("c", "foo:a/c");
    base.pass("../c", "foo:/c");
    base.pass("#f", "foo:a/b#f");

    // A merged path starting with "//" must not be taken for an authority.
    let base = Uri::parse("foo:/a").unwrap();
    base.pass(".//b", "foo:/.//b");

    let base = Uri::parse("foo:").unwrap();
    base.pass("/..//b", "foo:/.//b");

    // The base fragment never survives.
    let base = Uri::parse("http://a/b?q#f").unwrap();
    base.pass("", "http://a/b?q");
    base.pass("#g", "http://a/b?q#g");

    // Percent-encoded dots are not dot segments.
    let base = Uri::parse("http://a/b/c").unwrap();
    base.pass("%2E%2E/g", "http://a/b/%2E%2E/g");

    // Empty query and fragment are kept.
    base.pass("?#", "http://a/b/c?#");
}

#[test]
fn resolve_error() {
    let base = Uri::parse("foo/bar").unwrap();
    base.fail("baz", ResolveError::RelativeBase);
    base.fail("http://example.com/", ResolveError::RelativeBase);

    let base = Uri::parse("//a/b").unwrap();
    base.fail("c", ResolveError::RelativeBase);
}

#[test]
fn resolve_path_underflow() {
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    let resolver = Resolver::new().allow_path_underflow(false);

    for r in ["../../../g", "../../../../g", "/../g", "//h/..", "x:/.."] {
        let r = Uri::parse(r).unwrap();
        assert_eq!(resolver.resolve(&base, &r), Err(ResolveError::PathUnderflow));
    }
    let r = Uri::parse("../../g").unwrap();
    assert_eq!(resolver.resolve(&base, &r).unwrap(), "http://a/g");

    let mut uri = base.to_owned();
    let r = Uri::parse("/../g").unwrap();
    assert_eq!(
        resolver.resolve_in_place(&mut uri, &r),
        Err(ResolveError::PathUnderflow)
    );
    // Left untouched.
    assert_eq!(uri, "http://a/b/c/d;p?q");
}

#[test]
fn dot_segments() {
    assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
    assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
    assert_eq!(remove_dot_segments("/./.."), "/");
    assert_eq!(remove_dot_segments("a/./b/../../c"), "/c");
    assert_eq!(remove_dot_segments("/a/%2e/b"), "/a/%2e/b");

    // Idempotent on absolute paths.
    for path in ["/a/./b/../c/", "/../a/..", "/a//../b", "/.a/..b/"] {
        let once = remove_dot_segments(path);
        assert_eq!(remove_dot_segments(&once), once, "{path}");
    }
}

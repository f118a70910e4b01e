use core::net::Ipv4Addr;

use uriref::{
    component::{Host, HostKind},
    normalize::{NormalizeMask, Normalizer},
    Uri,
};

#[track_caller]
fn check(s: &str, expected: &str) {
    let u = Uri::parse(s).unwrap();
    let n = u.normalize();
    assert_eq!(n, expected);
    // Idempotent.
    assert_eq!(n.normalize(), n);
    // Parses back into itself.
    assert_eq!(Uri::parse(n.as_str()).unwrap(), n);
}

#[test]
fn normalize() {
    // Example from Section 6.2 of RFC 3986.
    check("eXAMPLE://a/./b/../b/%63/%7bfoo%7d", "example://a/b/c/%7Bfoo%7D");

    // Lowercase percent-encoded octet.
    check("%3a", "%3A");

    // Uppercase letters in scheme and registered name.
    check("HTTP://www.EXAMPLE.com/", "http://www.example.com/");

    // Empty port.
    check("http://example.com:/", "http://example.com/");

    // Default port.
    check("http://example.com:80/", "http://example.com/");
    check("https://example.com:443", "https://example.com");
    check("ws://example.com:080/", "ws://example.com/");
    check("http://example.com:8080/", "http://example.com:8080/");
    check("foo://example.com:80/", "foo://example.com:80/");

    // The port is kept with an empty host.
    check("http://:80/", "http://:80/");

    // Underflow in path resolution.
    check("http://a/../../../g", "http://a/g");

    // Percent-encoded dots are decoded before dot segments are removed.
    check("http://a/b/c/%2E/%2E./%2e%2E/d", "http://a/d");

    // Dot segments are removed from relative references too.
    check("/a/./b/../c", "/a/c");
    check("//h/./a", "//h/a");
    check("/../a", "/a");
    check("foo/../bar", "bar");
    check("foo:a/../b", "foo:b");

    // A rootless path keeps its leading "..", and stays rootless.
    check("../a/./b/../c", "../a/c");
    check("a/../../b?q", "../b?q");
    check("a/..", ".");
    check("a/..//b", ".//b");
    check("foo:a/..//b", "foo:.//b");
    check("x/../a:b", "./a:b");
    check("%2E%2E/a/%2e/b", "../a/b");

    // The empty path stays empty.
    check("http://example.com", "http://example.com");
    check("http://example.com?q", "http://example.com?q");

    // Userinfo, query and fragment keep their letter case.
    check("http://User%3a@H/?A%7e%41%3d#F%7E%2f", "http://User%3A@h/?A~A%3D#F~%2F");

    // IP literals.
    check("http://[::FFFF:1.2.3.4]/", "http://[::ffff:1.2.3.4]/");
    check("http://[V1.ABC]/", "http://[v1.abc]/");

    // A path starting with "//" after dot removal.
    check("foo:/.//bar", "foo:/.//bar");
    check("foo:/a/..//bar", "foo:/.//bar");

    // A rootless path is left intact.
    check("mailto:John.Doe@Example.COM", "mailto:John.Doe@Example.COM");
}

#[test]
fn normalize_host() {
    let u = Uri::parse("http://%41.com/").unwrap().normalize();
    assert_eq!(u, "http://a.com/");

    // A decoded registered name may turn into an IPv4 address.
    let u = Uri::parse("http://%31%32%37.0.0.1/").unwrap().normalize();
    assert_eq!(u, "http://127.0.0.1/");
    let auth = u.authority().unwrap();
    assert_eq!(auth.host_kind(), HostKind::Ipv4);
    assert_eq!(auth.host_parsed(), Host::Ipv4(Ipv4Addr::LOCALHOST));

    // A reserved character stays encoded.
    let u = Uri::parse("http://a%2Eb%2fc/").unwrap().normalize();
    assert_eq!(u, "http://a.b%2Fc/");
}

#[test]
fn normalize_mask() {
    let s = "HTTP://User%3a@Example.COM:80/a/./b/%7e?%7E#%41";
    let u = Uri::parse(s).unwrap();

    assert_eq!(Normalizer::new().mask(NormalizeMask::NONE).normalize(&u), s);
    assert_eq!(
        Normalizer::new().mask(NormalizeMask::ALL).normalize(&u),
        "http://User%3A@example.com/a/b/~?~#A"
    );

    let only = |mask: NormalizeMask| Normalizer::new().mask(mask).normalize(&u);
    let none = NormalizeMask::NONE;

    assert_eq!(
        only(NormalizeMask { scheme: true, ..none }),
        "http://User%3a@Example.COM:80/a/./b/%7e?%7E#%41"
    );
    assert_eq!(
        only(NormalizeMask { userinfo: true, ..none }),
        "HTTP://User%3A@Example.COM:80/a/./b/%7e?%7E#%41"
    );
    assert_eq!(
        only(NormalizeMask { host: true, ..none }),
        "HTTP://User%3a@example.com/a/./b/%7e?%7E#%41"
    );
    assert_eq!(
        only(NormalizeMask { path: true, ..none }),
        "HTTP://User%3a@Example.COM:80/a/b/~?%7E#%41"
    );
    assert_eq!(
        only(NormalizeMask { query: true, ..none }),
        "HTTP://User%3a@Example.COM:80/a/./b/%7e?~#%41"
    );
    assert_eq!(
        only(NormalizeMask { fragment: true, ..none }),
        "HTTP://User%3a@Example.COM:80/a/./b/%7e?%7E#A"
    );
}

#[test]
fn normalize_in_place() {
    let mut u = Uri::parse("HTTP://a/b/../c").unwrap().to_owned();
    u.normalize_in_place();
    assert_eq!(u, "http://a/c");
    assert_eq!(u.path(), "/c");

    let mut u = Uri::parse("HTTP://a/b/../c").unwrap().to_owned();
    Normalizer::new()
        .mask(NormalizeMask {
            path: false,
            ..NormalizeMask::default()
        })
        .normalize_in_place(&mut u);
    assert_eq!(u, "http://a/b/../c");
}

#[test]
fn default_port_with() {
    let normalizer = Normalizer::new().default_port_with(|_| None);
    let u = Uri::parse("http://example.com:80/").unwrap();
    assert_eq!(normalizer.normalize(&u), "http://example.com:80/");
}

use core::net::{Ipv4Addr, Ipv6Addr};

use uriref::{
    component::{Host, HostKind},
    pct_enc::EStr,
    Component, ParseErrorKind::*, Span, Uri,
};

#[test]
fn parse_absolute() {
    let u = Uri::parse("file:///etc/hosts").unwrap();
    assert_eq!(u.as_str(), "file:///etc/hosts");
    assert_eq!(u.scheme().unwrap().as_str(), "file");
    let a = u.authority().unwrap();
    assert_eq!(a.as_str(), "");
    assert_eq!(a.userinfo(), None);
    assert_eq!(a.host(), "");
    assert_eq!(a.host_kind(), HostKind::RegName);
    assert_eq!(a.host_parsed(), Host::RegName(EStr::new_or_panic("")));
    assert_eq!(a.port(), None);
    assert_eq!(u.path(), "/etc/hosts");
    assert!(u.path().segments().eq(["etc", "hosts"]));
    assert_eq!(u.query(), None);
    assert_eq!(u.fragment(), None);

    let u = Uri::parse("ftp://ftp.is.co.za/rfc/rfc1808.txt").unwrap();
    assert_eq!(u.scheme().unwrap().as_str(), "ftp");
    let a = u.authority().unwrap();
    assert_eq!(a.as_str(), "ftp.is.co.za");
    assert_eq!(a.host(), "ftp.is.co.za");
    assert_eq!(u.path(), "/rfc/rfc1808.txt");

    let u = Uri::parse("http://www.ietf.org/rfc/rfc2396.txt").unwrap();
    assert_eq!(u.authority().unwrap().host(), "www.ietf.org");

    let u = Uri::parse("ldap://[2001:db8::7]/c=GB?objectClass?one").unwrap();
    assert_eq!(u.scheme().unwrap().as_str(), "ldap");
    let a = u.authority().unwrap();
    assert_eq!(a.host(), "[2001:db8::7]");
    assert_eq!(
        a.host_parsed(),
        Host::Ipv6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 7))
    );
    assert_eq!(u.path(), "/c=GB");
    assert_eq!(u.query().unwrap(), "objectClass?one");

    let u = Uri::parse("mailto:John.Doe@example.com").unwrap();
    assert_eq!(u.scheme().unwrap().as_str(), "mailto");
    assert!(u.authority().is_none());
    assert_eq!(u.path(), "John.Doe@example.com");

    let u = Uri::parse("news:comp.infosystems.www.servers.unix").unwrap();
    assert_eq!(u.path(), "comp.infosystems.www.servers.unix");

    let u = Uri::parse("tel:+1-816-555-1212").unwrap();
    assert_eq!(u.path(), "+1-816-555-1212");

    let u = Uri::parse("telnet://192.0.2.16:80/").unwrap();
    let a = u.authority().unwrap();
    assert_eq!(a.host_parsed(), Host::Ipv4(Ipv4Addr::new(192, 0, 2, 16)));
    assert_eq!(a.port().unwrap(), "80");
    assert_eq!(a.port_to_u16(), Ok(Some(80)));
    assert_eq!(u.path(), "/");

    let u = Uri::parse("urn:oasis:names:specification:docbook:dtd:xml:4.1.2").unwrap();
    assert_eq!(u.scheme().unwrap().as_str(), "urn");
    assert_eq!(u.path(), "oasis:names:specification:docbook:dtd:xml:4.1.2");

    let u = Uri::parse("foo://user:pass@[v1.fe80::a+en1]:8042/over/there?name=ferret#nose")
        .unwrap();
    let a = u.authority().unwrap();
    assert_eq!(a.userinfo().unwrap(), "user:pass");
    assert_eq!(a.host_kind(), HostKind::IpvFuture);
    assert_eq!(a.host_parsed(), Host::IpvFuture("v1.fe80::a+en1"));
    assert_eq!(a.port().unwrap(), "8042");
    assert_eq!(u.query().unwrap(), "name=ferret");
    assert_eq!(u.fragment().unwrap(), "nose");
}

#[test]
fn parse_relative() {
    let u = Uri::parse("").unwrap();
    assert!(u.is_relative());
    assert!(!u.has_authority());
    assert_eq!(u.path(), "");
    assert_eq!(u.path().segments().count(), 0);
    assert!(!u.has_query());
    assert!(!u.has_fragment());

    let u = Uri::parse("foo.txt").unwrap();
    assert_eq!(u.scheme(), None);
    assert_eq!(u.path(), "foo.txt");

    let u = Uri::parse(".").unwrap();
    assert_eq!(u.path(), ".");

    let u = Uri::parse("./this:that").unwrap();
    assert_eq!(u.path(), "./this:that");

    let u = Uri::parse("//example.com").unwrap();
    assert_eq!(u.scheme(), None);
    assert_eq!(u.authority().unwrap().host(), "example.com");
    assert_eq!(u.path(), "");

    let u = Uri::parse("?#").unwrap();
    assert_eq!(u.path(), "");
    assert_eq!(u.query(), Some(EStr::EMPTY));
    assert_eq!(u.fragment(), Some(EStr::EMPTY));

    let u = Uri::parse("/a/b?c#d").unwrap();
    assert!(u.absolute_path());
    assert!(u.path().is_absolute());
    assert!(u.path().segments().eq(["a", "b"]));
}

#[test]
fn present_but_empty() {
    let u = Uri::parse("http://@:/?#").unwrap();
    let a = u.authority().unwrap();
    assert!(a.has_userinfo());
    assert_eq!(a.userinfo().unwrap(), "");
    assert_eq!(a.host(), "");
    assert!(a.has_port());
    assert_eq!(a.port().unwrap(), "");
    assert_eq!(a.port_to_u16(), Ok(None));
    assert_eq!(u.query().unwrap(), "");
    assert_eq!(u.fragment().unwrap(), "");

    let u = Uri::parse("http://h").unwrap();
    assert!(!u.authority().unwrap().has_userinfo());
    assert!(!u.authority().unwrap().has_port());
    assert!(!u.has_query());
    assert!(!u.has_fragment());
}

#[test]
fn spans() {
    let s = "foo://user@example.com:8042/over/there?name=ferret#nose";
    let u = Uri::parse(s).unwrap();
    assert_eq!(u.scheme_span(), Some(Span::new(0, 3)));
    assert_eq!(u.authority_span(), Some(Span::new(6, 27)));
    let a = u.authority().unwrap();
    assert_eq!(a.span(), Span::new(6, 27));
    assert_eq!(a.userinfo_span().unwrap().slice(s), "user");
    assert_eq!(a.host_span().slice(s), "example.com");
    assert_eq!(a.port_span().unwrap().slice(s), "8042");
    assert_eq!(u.path_span().slice(s), "/over/there");
    assert!(u
        .path_segment_spans()
        .map(|span| span.slice(s))
        .eq(["over", "there"]));
    assert_eq!(u.query_span().unwrap().slice(s), "name=ferret");
    assert_eq!(u.fragment_span().unwrap().slice(s), "nose");

    // Spans are ordered and do not overlap.
    let spans = [
        u.scheme_span().unwrap(),
        u.authority_span().unwrap(),
        u.path_span(),
        u.query_span().unwrap(),
        u.fragment_span().unwrap(),
    ];
    for w in spans.windows(2) {
        assert!(w[0].end() <= w[1].start());
    }
}

#[test]
fn ipv4_or_reg_name() {
    let host = |s: &str| {
        let u = Uri::parse(s).unwrap();
        u.authority().unwrap().host_kind()
    };
    assert_eq!(host("//0.0.0.0"), HostKind::Ipv4);
    assert_eq!(host("//255.255.255.255"), HostKind::Ipv4);
    assert_eq!(host("//256.0.0.1"), HostKind::RegName);
    assert_eq!(host("//01.2.3.4"), HostKind::RegName);
    assert_eq!(host("//1.2.3"), HostKind::RegName);
    assert_eq!(host("//1.2.3.4.5"), HostKind::RegName);
    assert_eq!(host("//1.2.3.4a"), HostKind::RegName);
    assert_eq!(host("//[::]"), HostKind::Ipv6);
    assert_eq!(host("//[::ffff:1.2.3.4]"), HostKind::Ipv6);
    assert_eq!(host("//[vF.x:y]"), HostKind::IpvFuture);
}

#[test]
fn parse_error() {
    #[track_caller]
    fn fail(s: &str, index: usize, kind: uriref::ParseErrorKind, component: Component) {
        let e = Uri::parse(s).unwrap_err();
        assert_eq!(e.index(), index, "{s}");
        assert_eq!(e.kind(), kind, "{s}");
        assert_eq!(e.component(), component, "{s}");
    }

    // Scheme not starting with a letter.
    fail("1http://", 0, UnexpectedCharOrEnd, Component::Scheme);
    fail("+a:", 0, UnexpectedCharOrEnd, Component::Scheme);
    // Colon in the first segment of a relative reference.
    fail("a_b:c", 3, UnexpectedCharOrEnd, Component::Path);
    assert!(Uri::parse("a/b:c").is_ok());

    // Invalid percent-encoded octets.
    fail("%", 0, InvalidOctet, Component::Path);
    fail("%1", 0, InvalidOctet, Component::Path);
    fail("%1G", 0, InvalidOctet, Component::Path);
    fail("?%zz", 1, InvalidOctet, Component::Query);
    fail("#a%", 2, InvalidOctet, Component::Fragment);
    fail("http://u:%zz@h", 9, InvalidOctet, Component::Authority);

    // Characters not allowed anywhere.
    fail("http://example.com/a b", 20, UnexpectedCharOrEnd, Component::Path);
    fail("?a#b#c", 4, UnexpectedCharOrEnd, Component::Fragment);
    fail("/\u{e9}", 1, UnexpectedCharOrEnd, Component::Path);
    fail("a[b", 1, UnexpectedCharOrEnd, Component::Path);

    // Authority.
    fail("http://", 7, UnexpectedCharOrEnd, Component::Authority);
    fail("http://?", 7, UnexpectedCharOrEnd, Component::Authority);
    fail("http://h:8a/", 11, UnexpectedCharOrEnd, Component::Authority);
    fail("http://[::1", 11, UnexpectedCharOrEnd, Component::Host);
    fail("http://[::1::]", 8, InvalidIpv6Addr, Component::Host);
    fail("http://[1:2:3:4:5:6:7]", 8, InvalidIpv6Addr, Component::Host);
    fail("http://[v1]", 10, UnexpectedCharOrEnd, Component::Host);
    fail("http://[x]", 8, UnexpectedCharOrEnd, Component::Host);
}

#[test]
fn remaining() {
    let input = "http://example.com/a b";
    let e = Uri::parse(input).unwrap_err();
    assert_eq!(e.remaining(input), " b");

    let input = "http://";
    let e = Uri::parse(input).unwrap_err();
    assert_eq!(e.remaining(input), "");
}

#[test]
fn parse_owned() {
    let u = Uri::parse(String::from("http://example.com/")).unwrap();
    assert_eq!(u.authority().unwrap().host(), "example.com");

    let (e, s) = Uri::parse(String::from("http://example.com/a b")).unwrap_err();
    assert_eq!(e.index(), 20);
    assert_eq!(s, "http://example.com/a b");

    let u: Uri<String> = "foo:bar".parse().unwrap();
    assert_eq!(u, "foo:bar");
}

#[test]
fn strip_fragment() {
    let u = Uri::parse("http://example.com/?q#f").unwrap();
    let s = u.strip_fragment();
    assert_eq!(s, "http://example.com/?q");
    assert_eq!(s.query().unwrap(), "q");
    assert!(!s.has_fragment());
}

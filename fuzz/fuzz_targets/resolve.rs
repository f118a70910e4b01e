#![no_main]
use libfuzzer_sys::fuzz_target;
use uriref::{resolve::Resolver, Uri};

fuzz_target!(|data: (&str, &str)| {
    let (Ok(base), Ok(r)) = (Uri::parse(data.0), Uri::parse(data.1)) else {
        return;
    };

    let Ok(u1) = r.resolve_against(&base) else {
        assert!(!base.has_scheme());
        return;
    };
    let u2 = Uri::parse(u1.as_str()).unwrap();

    assert_eq!(
        u1.scheme().map(|s| s.as_str()),
        u2.scheme().map(|s| s.as_str())
    );
    assert_eq!(u1.authority().is_some(), u2.authority().is_some());

    if let Some(a1) = u1.authority() {
        let a2 = u2.authority().unwrap();
        assert_eq!(a1.as_str(), a2.as_str());
        assert_eq!(a1.userinfo(), a2.userinfo());
        assert_eq!(a1.host(), a2.host());
        assert_eq!(a1.host_parsed(), a2.host_parsed());
        assert_eq!(a1.port(), a2.port());
    }

    assert_eq!(u1.path(), u2.path());
    assert_eq!(u1.query(), u2.query());
    assert_eq!(u1.fragment(), u2.fragment());

    // Disallowing underflow either fails or agrees.
    if let Ok(u3) = Resolver::new()
        .allow_path_underflow(false)
        .resolve(&base, &r)
    {
        assert_eq!(u1, u3);
    }
});

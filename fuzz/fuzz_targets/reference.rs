#![no_main]
use libfuzzer_sys::fuzz_target;
use uriref::{reference::create_reference, resolve::remove_dot_segments, Uri};

fuzz_target!(|data: (&str, &str, bool)| {
    let (Ok(target), Ok(base)) = (Uri::parse(data.0), Uri::parse(data.1)) else {
        return;
    };
    let Ok(r) = create_reference(&target, &base, data.2) else {
        return;
    };
    assert!(!r.has_scheme());

    let (Some(t_scheme), Some(b_scheme)) = (target.scheme(), base.scheme()) else {
        unreachable!();
    };
    let t_path = target.path().as_str();
    if t_scheme.as_str() != b_scheme.as_str() || remove_dot_segments(t_path) != t_path {
        return;
    }
    assert_eq!(r.resolve_against(&base).unwrap(), target);
});

#![no_main]
use libfuzzer_sys::fuzz_target;
use uriref::query::{decode_query, encode_query, QueryPair};

fuzz_target!(|data: Vec<(String, Option<String>)>| {
    let pairs: Vec<QueryPair> = data
        .into_iter()
        .map(|(key, value)| QueryPair { key, value })
        .filter(|pair| !pair.key.is_empty() || pair.value.is_some())
        .collect();

    let encoded = encode_query(&pairs);
    assert_eq!(decode_query(&encoded), pairs);
});

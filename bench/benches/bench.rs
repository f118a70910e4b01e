use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uriref::{
    query::{decode_query, encode_query},
    recompose::serialize,
    reference::create_reference,
    Uri,
};

criterion_group!(
    benches,
    bench_parse,
    bench_serialize,
    bench_normalize,
    bench_resolve,
    bench_create_reference,
    bench_query,
);
criterion_main!(benches);

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";
const NORMALIZE_CASE: &str = "eXAMPLE://a/./b/../b/%63/%7bfoo%7d";
const RESOLVE_CASE_BASE: &str = "http://example.com/foo/bar";
const RESOLVE_CASE_REF: &str = "../baz";
const REFERENCE_CASE_TARGET: &str = "http://example.com/a/x/y?q";
const QUERY_CASE: &str = "name=%E5%BC%A0%E4%B8%89&q=a%20b%26c&flag&lang=en";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| Uri::parse(black_box(PARSE_CASE))));
}

fn bench_serialize(c: &mut Criterion) {
    let uri = Uri::parse(PARSE_CASE).unwrap();
    c.bench_function("serialize", |b| b.iter(|| serialize(black_box(&uri))));
}

fn bench_normalize(c: &mut Criterion) {
    let uri = Uri::parse(NORMALIZE_CASE).unwrap();
    c.bench_function("normalize", |b| b.iter(|| black_box(&uri).normalize()));
}

fn bench_resolve(c: &mut Criterion) {
    let base = Uri::parse(RESOLVE_CASE_BASE).unwrap();
    let r = Uri::parse(RESOLVE_CASE_REF).unwrap();
    c.bench_function("resolve", |b| {
        b.iter(|| black_box(&r).resolve_against(black_box(&base)))
    });
}

fn bench_create_reference(c: &mut Criterion) {
    let base = Uri::parse(RESOLVE_CASE_BASE).unwrap();
    let target = Uri::parse(REFERENCE_CASE_TARGET).unwrap();
    c.bench_function("create_reference", |b| {
        b.iter(|| create_reference(black_box(&target), black_box(&base), false))
    });
}

fn bench_query(c: &mut Criterion) {
    c.bench_function("decode_query", |b| {
        b.iter(|| decode_query(black_box(QUERY_CASE)))
    });
    let pairs = decode_query(QUERY_CASE);
    c.bench_function("encode_query", |b| {
        b.iter(|| encode_query(black_box(&pairs)))
    });
}

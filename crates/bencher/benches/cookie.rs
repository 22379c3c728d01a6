use bencher::HeaderCase;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};
use micro_cookie::{CookieConfig, CookiePlugin, signature};
use std::hint::black_box;

static SMALL_HEADER: HeaderCase = HeaderCase::new("small", "small.txt", include_str!("../resources/cookie/small.txt"));
static LARGE_HEADER: HeaderCase = HeaderCase::new("large", "large.txt", include_str!("../resources/cookie/large.txt"));

fn headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(value).expect("resource should be a valid header value"));
    headers
}

fn benchmark_parse_request(criterion: &mut Criterion) {
    let plugin = CookiePlugin::register(None);
    let mut group = criterion.benchmark_group("parse_request");

    for case in [SMALL_HEADER, LARGE_HEADER] {
        let headers = headers(case.header());
        group.throughput(Throughput::Elements(case.pairs() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &headers, |b, headers| {
            b.iter(|| black_box(plugin.parse_request(headers)));
        });
    }

    group.finish();
}

fn benchmark_parse_signed_request(criterion: &mut Criterion) {
    let plugin = CookiePlugin::register(Some(CookieConfig::new().secret("bench-secret").unsign(true)));
    let header = (0..20)
        .map(|i| format!("c{i}={}", urlencoding::encode(&signature::sign(&format!("value-{i}"), "bench-secret"))))
        .collect::<Vec<_>>()
        .join("; ");
    let headers = headers(&header);

    criterion.bench_function("parse_signed_request", |b| {
        b.iter(|| black_box(plugin.parse_request(&headers)));
    });
}

fn benchmark_write_cookies(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("write_cookies");

    for (name, config) in [("plain", CookieConfig::new()), ("signed", CookieConfig::new().secret("bench-secret"))] {
        let plugin = CookiePlugin::register(Some(config));
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut res = plugin.response();
                res.cookies([("sid", "9f8c2b7e1a"), ("theme", "dark"), ("lang", "en-US")], None)
                    .expect("benchmark cookies should be valid");
                black_box(res)
            });
        });
    }

    group.finish();
}

criterion_group!(cookie, benchmark_parse_request, benchmark_parse_signed_request, benchmark_write_cookies);
criterion_main!(cookie);

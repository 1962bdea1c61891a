//! 链接检测基准测试
//!
//! 测试检测结果构建和序列化的性能

use criterion::{criterion_group, criterion_main, Criterion};
use link_vitals::check::{CheckOutcome, LinkKind, LinkRequest};
use std::hint::black_box;
use std::time::Duration;

/// 链接检测基准测试
fn url_checker_benchmark(c: &mut Criterion) {
    c.bench_function("outcome_creation", |b| {
        b.iter(|| {
            let outcome = CheckOutcome::ok(
                "https://zhangwei.example.com/",
                "http://zhangwei.example.com/",
                200,
            )
            .with_elapsed(Duration::from_millis(245));

            black_box(outcome)
        });
    });

    c.bench_function("outcome_serialization", |b| {
        let outcome = create_test_outcome();

        b.iter(|| {
            let json = outcome.to_json().unwrap();
            black_box(json)
        });
    });

    c.bench_function("outcome_deserialization", |b| {
        let json_str = r#"{
            "url": "https://zhangwei.example.com/",
            "original_url": "http://zhangwei.example.com/",
            "status": "ok",
            "status_code": 200,
            "location": null,
            "message": null,
            "checked_at": "2024-05-01T08:30:00Z",
            "elapsed": 245,
            "events": [
                {
                    "kind": "upgrade_attempted",
                    "from": "http://zhangwei.example.com/",
                    "to": "https://zhangwei.example.com/"
                }
            ]
        }"#;

        b.iter(|| {
            let outcome = CheckOutcome::from_json(json_str).unwrap();
            black_box(outcome)
        });
    });

    c.bench_function("request_creation", |b| {
        b.iter(|| {
            let requests: Vec<LinkRequest> = (0..100)
                .map(|i| {
                    LinkRequest::new(
                        format!("教练{}", i),
                        LinkKind::Website,
                        format!("https://coach-{}.example.com", i),
                    )
                })
                .collect();

            black_box(requests)
        });
    });
}

/// 创建测试检测结果
fn create_test_outcome() -> CheckOutcome {
    CheckOutcome::redirect(
        "https://zhangwei.example.com/",
        "http://zhangwei.example.com/",
        301,
    )
    .with_location("https://www.zhangwei.example.com/".to_string())
    .with_elapsed(Duration::from_millis(245))
}

criterion_group!(benches, url_checker_benchmark);
criterion_main!(benches);

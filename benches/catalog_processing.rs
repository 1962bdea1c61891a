//! 教练数据处理基准测试
//!
//! 测试数据解析和检测请求收集的性能

use criterion::{criterion_group, criterion_main, Criterion};
use link_vitals::catalog::{CoachRecord, ContactInfo};
use link_vitals::check::BatchRunner;
use std::hint::black_box;

/// 教练数据处理基准测试
fn catalog_processing_benchmark(c: &mut Criterion) {
    c.bench_function("catalog_parsing", |b| {
        let yaml_str = r#"
- name: 张伟
  title: 高管教练
  contact:
    website: https://zhangwei.example.com
    linkedin: https://linkedin.com/in/zhangwei
    calendly: https://calendly.com/zhangwei
- name: 李娜
  contact:
    website: https://lina.example.com
    linkedin: ""
- name: 王强
  contact: {}
"#;

        b.iter(|| {
            let records: Vec<CoachRecord> = serde_yaml::from_str(yaml_str).unwrap();
            black_box(records)
        });
    });

    c.bench_function("catalog_serialization", |b| {
        let records = create_test_records(50);

        b.iter(|| {
            let yaml = serde_yaml::to_string(&records).unwrap();
            black_box(yaml)
        });
    });

    c.bench_function("collect_requests", |b| {
        let records = create_test_records(50);

        b.iter(|| {
            let requests = BatchRunner::collect_requests(&records);
            black_box(requests)
        });
    });
}

/// 创建测试教练记录
fn create_test_records(count: usize) -> Vec<CoachRecord> {
    (0..count)
        .map(|i| CoachRecord {
            name: format!("教练{}", i),
            contact: ContactInfo {
                website: Some(format!("https://coach-{}.example.com", i)),
                linkedin: (i % 2 == 0).then(|| format!("https://linkedin.com/in/coach-{}", i)),
                calendly: (i % 3 == 0).then(|| format!("https://calendly.com/coach-{}", i)),
            },
        })
        .collect()
}

criterion_group!(benches, catalog_processing_benchmark);
criterion_main!(benches);

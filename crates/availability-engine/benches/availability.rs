use std::hint::black_box;

use availability_engine::planner::{compute_availability_with, Candidate};
use availability_engine::{DateRange, Resource, ResourceKind, Session};
use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn candidates(n: usize, sessions_each: usize) -> Vec<Candidate> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..n)
        .map(|i| Candidate {
            resource: Resource::new(format!("r{}", i), format!("Resource {}", i), ResourceKind::Trainer),
            sessions: (0..sessions_each)
                .map(|j| {
                    let start = base + Days::new(((i * 7 + j * 3) % 300) as u64);
                    Session::new(
                        format!("s{}-{}", i, j),
                        format!("Session {}-{}", i, j),
                        "trn",
                        DateRange::new(start, start + Days::new((j % 5) as u64)).unwrap(),
                    )
                })
                .collect(),
        })
        .collect()
}

fn bench_compute_availability(c: &mut Criterion) {
    let target = DateRange::new(
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        NaiveDate::from_ymd_opt(2024, 4, 26).unwrap(),
    )
    .unwrap();
    let length = target.weekdays();

    let mut group = c.benchmark_group("compute_availability");
    for n in [16usize, 256, 4096] {
        let pool = candidates(n, 40);
        group.bench_with_input(BenchmarkId::new("sequential", n), &pool, |b, pool| {
            b.iter(|| compute_availability_with(black_box(&target), length, pool, usize::MAX))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &pool, |b, pool| {
            b.iter(|| compute_availability_with(black_box(&target), length, pool, 0))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_availability);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};

use aoc1718::{default_input, YEARS};

pub fn criterion_benchmark(c: &mut Criterion) {
    for &(year, days) in YEARS {
        for (i, day) in days.iter().enumerate() {
            c.bench_function(&format!("{}-day{}", year, i + 1), |b| {
                let input = default_input(year, i + 1).unwrap();
                b.iter(|| day(&input))
            });
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

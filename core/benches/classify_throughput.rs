//! Classification throughput over growing coverage tables.
//!
//! Coverage scans are linear in range length; this pins the constant
//! factor so table or set changes in the coverage model show up.

use std::collections::BTreeMap;

use covbench_core::coverage::{classify, FileCoverage, FileId, MethodRange};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn fixture(lines: u32) -> (BTreeMap<FileId, FileCoverage>, MethodRange) {
    let mut coverage = FileCoverage {
        begin_line: 1,
        end_line: lines,
        not_covered: Default::default(),
        partly_covered: Default::default(),
        fully_covered: Default::default(),
    };
    for line in 1..=lines {
        match line % 4 {
            0 => {}
            1 => {
                coverage.fully_covered.insert(line);
            }
            2 => {
                coverage.partly_covered.insert(line);
            }
            _ => {
                coverage.not_covered.insert(line);
            }
        }
    }

    let mut per_file = BTreeMap::new();
    per_file.insert("Bench".to_string(), coverage);

    let primary = MethodRange {
        owner: "Bench".to_string(),
        name: "scan".to_string(),
        begin_line: 1,
        end_line: lines,
    };
    (per_file, primary)
}

fn bench_single_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_single_range");

    for lines in [100u32, 1_000, 10_000] {
        let (per_file, primary) = fixture(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| classify(black_box(&per_file), black_box(&primary), &[], 80.0))
        });
    }

    group.finish();
}

fn bench_with_auxiliaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_with_auxiliaries");

    let (per_file, primary) = fixture(10_000);
    for aux_count in [1usize, 8, 64] {
        let auxiliary: Vec<MethodRange> = (0..aux_count)
            .map(|i| MethodRange {
                owner: "Bench".to_string(),
                name: format!("helper_{i}"),
                begin_line: 1 + (i as u32 * 100),
                end_line: 100 + (i as u32 * 100),
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(aux_count),
            &aux_count,
            |b, _| b.iter(|| classify(black_box(&per_file), black_box(&primary), &auxiliary, 80.0)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_range, bench_with_auxiliaries);
criterion_main!(benches);

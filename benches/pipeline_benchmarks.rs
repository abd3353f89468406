//! Benchmarks for the detail-table shaping pipeline

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hospdash_core::pipeline::{shape_page, sort_rows};
use hospdash_core::types::{RevenueDetailRow, SortColumn, SortDirection};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Deterministic row batch shaped like one quarter of inpatient bookings
fn make_rows(count: usize) -> Vec<RevenueDetailRow> {
    let departments = [
        ("CARD", "Cardiology"),
        ("NEUR", "Neurology"),
        ("ORTH", "Orthopedics"),
        ("PEDS", "Pediatrics"),
    ];
    let base = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");

    (0..count)
        .map(|i| {
            let (code, name) = departments[i % departments.len()];
            let doctor_id = (i % 24) as i64 + 1;
            RevenueDetailRow {
                date: base + chrono::Duration::days((i % 90) as i64),
                department_code: code.to_string(),
                department_name: name.to_string(),
                doctor_id,
                doctor_name: format!("Doctor {doctor_id:02}"),
                revenue: Decimal::new(((i * 7919) % 500_000) as i64, 2),
                cost: Decimal::new(((i * 4007) % 250_000) as i64, 2),
                yoy_pct: (i % 11 != 0).then(|| ((i % 83) as f64) - 41.0),
                mom_pct: (i % 7 != 0).then(|| ((i % 29) as f64) - 14.0),
            }
        })
        .collect()
}

/// Benchmark the column sorts over realistic batch sizes
fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_rows");

    for size in [100usize, 1_000, 10_000] {
        let rows = make_rows(size);
        group.throughput(Throughput::Elements(size as u64));

        for column in [SortColumn::Revenue, SortColumn::Doctor, SortColumn::YoyPct] {
            group.bench_with_input(
                BenchmarkId::new(column.to_string(), size),
                &rows,
                |b, rows| {
                    b.iter_batched(
                        || rows.clone(),
                        |mut rows| sort_rows(&mut rows, column, SortDirection::Desc),
                        criterion::BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the composed filter -> sort -> paginate pipeline
fn bench_shape_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_page");

    let rows = make_rows(10_000);
    let selected: BTreeSet<i64> = (1..=6).collect();

    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("filtered_first_page", |b| {
        b.iter(|| {
            shape_page(
                &rows,
                &selected,
                SortColumn::Revenue,
                SortDirection::Desc,
                1,
                20,
            )
        });
    });

    group.bench_function("unfiltered_deep_page", |b| {
        b.iter(|| {
            shape_page(
                &rows,
                &BTreeSet::new(),
                SortColumn::Date,
                SortDirection::Asc,
                250,
                20,
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_sort, bench_shape_page);
criterion_main!(benches);

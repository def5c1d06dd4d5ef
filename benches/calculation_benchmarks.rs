//! Performance benchmarks for the payslip engine.
//!
//! This benchmark suite verifies that the computation engine meets
//! performance targets:
//! - Single payslip computation: < 100μs mean
//! - Batch of 100 employees: < 10ms mean
//! - Batch of 1000 employees: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use payslip_engine::calculation::{CancelToken, PayslipComputer};
use payslip_engine::config::{ScheduleLoader, ScheduleSet};
use payslip_engine::models::{
    EarningsKind, EarningsLine, EmployeePeriodInput, Money, PeriodType, SubPeriod,
};

/// Loads the shipped schedule set.
fn load_schedules() -> ScheduleSet {
    ScheduleLoader::load("./config/ph")
        .expect("Failed to load schedules")
        .schedules()
        .clone()
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
}

/// Creates one semi-monthly input with a salary varied by index.
fn create_input(index: usize) -> EmployeePeriodInput {
    // Salaries spread between 15,000 and 65,000 so the batch exercises
    // several brackets of every table.
    let salary = Money::new(Decimal::new(15_000_00 + (index as i64 % 100) * 500_00, 2));
    let gross = Money::new(salary.as_decimal() / Decimal::TWO);

    EmployeePeriodInput {
        company_id: "acme".to_string(),
        payroll_run_id: Uuid::from_u128(1),
        employee_id: format!("emp_bench_{:04}", index),
        period_type: PeriodType::SemiMonthly,
        sub_period: Some(SubPeriod::Second),
        monthly_equivalent_salary: salary,
        earnings_lines: vec![EarningsLine {
            kind: EarningsKind::BasePay,
            amount: gross,
        }],
        other_deduction_lines: vec![],
        loan_amount: Money::ZERO,
    }
}

/// Benchmark: Single payslip computation.
///
/// Target: < 100μs mean
fn bench_single_payslip(c: &mut Criterion) {
    let schedules = load_schedules();
    let computer = PayslipComputer::new(&schedules);
    let input = create_input(0);

    c.bench_function("single_payslip", |b| {
        b.iter(|| {
            let slip = computer.compute(black_box(&input), as_of()).unwrap();
            black_box(slip)
        })
    });
}

/// Benchmark: Batch of 100 employees.
///
/// Target: < 10ms mean
fn bench_batch_100(c: &mut Criterion) {
    let schedules = load_schedules();
    let computer = PayslipComputer::new(&schedules);
    let inputs: Vec<EmployeePeriodInput> = (0..100).map(create_input).collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.iter(|| {
            let outcome = computer.compute_run(black_box(&inputs), as_of(), &CancelToken::new());
            black_box(outcome)
        })
    });

    group.finish();
}

/// Benchmark: Batch of 1000 employees.
///
/// Target: < 100ms mean
fn bench_batch_1000(c: &mut Criterion) {
    let schedules = load_schedules();
    let computer = PayslipComputer::new(&schedules);
    let inputs: Vec<EmployeePeriodInput> = (0..1000).map(create_input).collect();

    let mut group = c.benchmark_group("large_batch_processing");
    group.throughput(Throughput::Elements(1000));
    // Reduce sample size for large batches to keep benchmark time reasonable
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            let outcome = computer.compute_run(black_box(&inputs), as_of(), &CancelToken::new());
            black_box(outcome)
        })
    });

    group.finish();
}

/// Benchmark: Batch sizes to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let schedules = load_schedules();
    let computer = PayslipComputer::new(&schedules);

    let mut group = c.benchmark_group("scaling");

    for batch_size in [1usize, 10, 25, 50] {
        let inputs: Vec<EmployeePeriodInput> = (0..batch_size).map(create_input).collect();

        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", batch_size),
            &inputs,
            |b, inputs| {
                b.iter(|| {
                    let outcome =
                        computer.compute_run(black_box(inputs), as_of(), &CancelToken::new());
                    black_box(outcome)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: Schedule loading from disk.
fn bench_schedule_load(c: &mut Criterion) {
    c.bench_function("schedule_load", |b| {
        b.iter(|| {
            let loader = ScheduleLoader::load("./config/ph").unwrap();
            black_box(loader)
        })
    });
}

criterion_group!(
    benches,
    bench_single_payslip,
    bench_batch_100,
    bench_batch_1000,
    bench_scaling,
    bench_schedule_load,
);
criterion_main!(benches);

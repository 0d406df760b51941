//! Performance benchmarks for the scheduling engine.
//!
//! This benchmark suite verifies that the engine meets performance targets:
//! - Shift creation through the API: < 200μs mean
//! - Week schedule read (28 shifts): < 500μs mean
//! - Day grid projection: < 50μs mean
//! - Weekly totals over 100 shifts: < 200μs mean
//! - Timesheet export at 500 sheets: < 2ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use roster_engine::api::{create_router, AppState};
use roster_engine::grid::project_day;
use roster_engine::models::{NewShift, NewStaff, ShiftStatus};
use roster_engine::store::ScheduleStore;

use axum::{body::Body, http::Request};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;
use tower::ServiceExt;
use uuid::Uuid;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 2).unwrap()
}

fn bench_staff(n: usize) -> NewStaff {
    NewStaff {
        name: format!("Staff {:03}", n),
        role: "Barista".to_string(),
        hourly_rate: Decimal::from_str("12.00").unwrap(),
        color: "#0ea5e9".to_string(),
        preferred_hours: Decimal::new(30, 0),
    }
}

/// Seeds one business with `staff_count` staff members working
/// `days` consecutive 7.5h day shifts each.
fn seed_week(store: &ScheduleStore, business_id: Uuid, staff_count: usize, days: i64) -> Vec<Uuid> {
    let mut shift_ids = Vec::new();
    for n in 0..staff_count {
        let staff = store.create_staff(business_id, bench_staff(n));
        for day in 0..days {
            let date = monday() + Duration::days(day);
            let view = store
                .create_shift(
                    business_id,
                    NewShift {
                        staff_id: staff.id,
                        role: None,
                        start: date.and_hms_opt(9, 0, 0).unwrap(),
                        end: date.and_hms_opt(17, 0, 0).unwrap(),
                        break_minutes: 30,
                        status: ShiftStatus::Draft,
                    },
                )
                .expect("Failed to seed shift");
            shift_ids.push(view.shift.id);
        }
    }
    shift_ids
}

/// Benchmark: Shift creation through the API.
///
/// Target: < 200μs mean
fn bench_create_shift(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = ScheduleStore::default();
    let business_id = Uuid::new_v4();
    let staff = store.create_staff(business_id, bench_staff(0));
    let router = create_router(AppState::new(store));

    let body = serde_json::json!({
        "business_id": business_id,
        "shift": {
            "staff_id": staff.id,
            "start": "2024-12-02T09:00:00",
            "end": "2024-12-02T17:00:00",
            "break_minutes": 30
        }
    })
    .to_string();

    c.bench_function("create_shift", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/shifts")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Reading a full week of the schedule (4 staff x 7 days).
///
/// Target: < 500μs mean
fn bench_week_schedule_read(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = ScheduleStore::default();
    let business_id = Uuid::new_v4();
    seed_week(&store, business_id, 4, 7);
    let router = create_router(AppState::new(store));

    let uri = format!("/schedule?business_id={}&week_start=2024-12-02", business_id);

    let mut group = c.benchmark_group("schedule_read");
    group.throughput(Throughput::Elements(28));

    group.bench_function("week_28_shifts", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri(uri.clone())
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });

    group.finish();
}

/// Benchmark: Day grid projection at various occupancy levels.
///
/// Target: < 50μs mean for a typical day
fn bench_grid_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_projection");

    for staff_count in [1, 4, 8].iter() {
        let store = ScheduleStore::default();
        let business_id = Uuid::new_v4();
        seed_week(&store, business_id, *staff_count, 1);
        let shifts = store.shifts_for_day(business_id, monday());

        group.throughput(Throughput::Elements(*staff_count as u64));
        group.bench_with_input(
            BenchmarkId::new("shifts", staff_count),
            staff_count,
            |b, _| b.iter(|| black_box(project_day(monday(), &shifts))),
        );
    }

    group.finish();
}

/// Benchmark: Weekly totals over 100 shifts.
///
/// Target: < 200μs mean
fn bench_weekly_totals(c: &mut Criterion) {
    let store = ScheduleStore::default();
    let business_id = Uuid::new_v4();
    // 20 staff working Monday to Friday
    seed_week(&store, business_id, 20, 5);

    c.bench_function("weekly_totals_100_shifts", |b| {
        b.iter(|| black_box(store.weekly_totals(business_id, monday())))
    });
}

/// Benchmark: Timesheet export scaling.
///
/// Target: < 2ms mean at 500 sheets
fn bench_export_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("timesheet_export");

    for sheet_count in [50, 200, 500].iter() {
        let store = ScheduleStore::default();
        let business_id = Uuid::new_v4();
        // One staff member per 25 sheets, one shift per day each
        let staff_count = sheet_count / 25;
        let shift_ids = seed_week(&store, business_id, staff_count, 25);
        for shift_id in &shift_ids {
            store
                .submit_timesheet(
                    business_id,
                    *shift_id,
                    Decimal::from_str("7.5").unwrap(),
                    None,
                    None,
                )
                .expect("Failed to seed timesheet");
        }

        group.throughput(Throughput::Elements(*sheet_count as u64));
        group.bench_with_input(
            BenchmarkId::new("timesheets", sheet_count),
            sheet_count,
            |b, _| b.iter(|| black_box(store.timesheet_rows(business_id))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_create_shift,
    bench_week_schedule_read,
    bench_grid_projection,
    bench_weekly_totals,
    bench_export_scaling,
);
criterion_main!(benches);

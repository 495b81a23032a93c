use airquality_processor::analyzers::{Aggregator, AirQualityAnalyzer};
use airquality_processor::config::GoodRatioJoin;
use airquality_processor::models::{AirQualityRecord, Measurement};
use airquality_processor::processors::{Enricher, IntegrityChecker};
use airquality_processor::readers::MeasurementReader;
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// One reading per district per day for a year
fn create_test_measurements(district_count: usize, days: usize) -> Vec<Measurement> {
    let base_date = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    let mut measurements = Vec::with_capacity(district_count * days);

    for day in 0..days {
        let date = base_date + chrono::Duration::days(day as i64);
        for district in 0..district_count {
            let pm10 = ((day * 7 + district * 13) % 180) as f64 + 0.5;
            measurements.push(Measurement::new(
                date,
                format!("District {:02}", district),
                pm10,
                pm10 * 0.45,
            ));
        }
    }

    measurements
}

fn create_test_csv(district_count: usize, days: usize) -> String {
    let mut csv = String::from("날짜,측정소명,미세먼지,초미세먼지\n");
    for m in create_test_measurements(district_count, days) {
        csv.push_str(&format!("{},{},{},{}\n", m.date, m.district, m.pm10, m.pm25));
    }
    csv.push_str("평균,,,\n");
    csv
}

fn enriched(district_count: usize, days: usize) -> Vec<AirQualityRecord> {
    Enricher::new().enrich(create_test_measurements(district_count, days))
}

fn benchmark_normalize(c: &mut Criterion) {
    let csv = create_test_csv(25, 365);
    let reader = MeasurementReader::new();

    c.bench_function("normalize_csv", |b| {
        b.iter(|| {
            let (measurements, _) = reader.read_from_str(black_box(&csv)).unwrap();
            black_box(measurements.len())
        })
    });
}

fn benchmark_enrich(c: &mut Criterion) {
    let measurements = create_test_measurements(25, 365);

    c.bench_function("enrich", |b| {
        b.iter(|| black_box(Enricher::new().enrich(measurements.clone()).len()))
    });
}

fn benchmark_aggregations(c: &mut Criterion) {
    let records = enriched(25, 365);

    c.bench_function("mean_pm10_by_district", |b| {
        b.iter(|| black_box(Aggregator::new(&records).mean_pm10_by_district().len()))
    });

    c.bench_function("season_grade_distribution", |b| {
        b.iter(|| black_box(Aggregator::new(&records).season_grade_distribution().len()))
    });

    c.bench_function("integrity_checker", |b| {
        b.iter(|| black_box(IntegrityChecker::new().check_integrity(&records).total_records))
    });
}

fn benchmark_varying_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis_by_size");

    for &size in &[5, 25, 100] {
        group.bench_with_input(
            BenchmarkId::new("districts", size),
            &size,
            |b, &district_count| {
                let records = enriched(district_count, 365);
                let analyzer = AirQualityAnalyzer::new(5, GoodRatioJoin::Inner);

                b.iter(|| black_box(analyzer.analyze(&records).total_records))
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_enrich,
    benchmark_aggregations,
    benchmark_varying_data_sizes
);
criterion_main!(benches);

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scalingreport::{
    bench_utils::{STRONG_SCALING_THREADS, SyntheticLog, generate_log},
    compute_rows, extract_from_reader,
    sample::scan_str,
};

const LOG_SEED: u64 = 0x5CA1;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn bench_repeats() -> &'static [usize] {
    #[cfg(feature = "bench-ci")]
    {
        &[1, 10]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[1, 100, 1_000]
    }
}

fn bench_logs() -> Vec<(usize, SyntheticLog)> {
    bench_repeats()
        .iter()
        .map(|&repeats| {
            let log = generate_log(
                &STRONG_SCALING_THREADS,
                12.0,
                0.92,
                repeats,
                LOG_SEED + repeats as u64,
            );
            (repeats, log)
        })
        .collect()
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for (repeats, log) in bench_logs() {
        group.bench_with_input(BenchmarkId::new("lines", log.lines()), &log, |b, log| {
            b.iter(|| scan_str(&log.content));
        });
        let samples = scan_str(&log.content);
        group.bench_with_input(BenchmarkId::new("rows", repeats), &samples, |b, samples| {
            b.iter(|| compute_rows(samples));
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for (repeats, log) in bench_logs() {
        group.bench_with_input(BenchmarkId::new("report", repeats), &log, |b, log| {
            b.iter(|| {
                extract_from_reader(log.content.as_bytes(), "synthetic.out", "GCC")
                    .map(|report| report.render_markdown())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scan, bench_extract);
criterion_main!(benches);

use crate::sample::Sample;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricsRow {
    pub threads: u32,
    pub elapsed_seconds: f64,
    pub speedup: f64,
    pub efficiency: f64,
}

impl MetricsRow {
    pub fn derive(sample: &Sample, baseline: &Sample) -> Self {
        let speedup = if sample.elapsed_seconds > 0.0 {
            baseline.elapsed_seconds / sample.elapsed_seconds
        } else {
            0.0
        };
        Self {
            threads: sample.threads,
            elapsed_seconds: sample.elapsed_seconds,
            speedup,
            efficiency: speedup / f64::from(sample.threads),
        }
    }
}

pub fn sort_by_threads(samples: &mut [Sample]) {
    samples.sort_by_key(|sample| sample.threads);
}

pub fn find_baseline(samples: &[Sample]) -> Option<&Sample> {
    samples.iter().find(|sample| sample.threads == 1)
}

/// Sorts the samples and derives one row per sample against the
/// single-thread run. `None` when no single-thread sample exists.
pub fn compute_rows(samples: &[Sample]) -> Option<Vec<MetricsRow>> {
    let mut sorted = samples.to_vec();
    sort_by_threads(&mut sorted);
    let baseline = *find_baseline(&sorted)?;
    Some(
        sorted
            .iter()
            .map(|sample| MetricsRow::derive(sample, &baseline))
            .collect(),
    )
}

use std::fmt::Write as _;

use rand::{Rng, SeedableRng, rngs::StdRng};

pub const STRONG_SCALING_THREADS: [u32; 6] = [1, 2, 4, 8, 16, 32];

#[derive(Clone, Debug)]
pub struct SyntheticLog {
    pub content: String,
    pub samples: Vec<(u32, f64)>,
}

impl SyntheticLog {
    pub fn lines(&self) -> usize {
        self.content.lines().count()
    }
}

/// Builds a strong-scaling log: `repeats` passes over `threads`, each run
/// wrapped in job noise, with times following Amdahl's law plus jitter.
pub fn generate_log(
    threads: &[u32],
    serial_seconds: f64,
    parallel_fraction: f64,
    repeats: usize,
    seed: u64,
) -> SyntheticLog {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut content = String::new();
    let mut samples = Vec::with_capacity(threads.len() * repeats);
    content.push_str("Job started on node c042\n");
    for pass in 0..repeats {
        for &t in threads {
            let ideal = serial_seconds * ((1.0 - parallel_fraction) + parallel_fraction / f64::from(t));
            let jitter = rng.gen_range(0.97..1.03);
            let elapsed = ideal * jitter;
            let _ = writeln!(content, "-> Threads = {t}");
            let _ = writeln!(content, "OMP_NUM_THREADS={t} pass={pass}");
            let _ = writeln!(content, "grid 4096x4096, 200 iterations");
            let _ = writeln!(content, "STENCIL_TIME: {elapsed:.6}");
            let _ = writeln!(content, "checksum {:.4}", rng.gen_range(0.0..1.0));
            samples.push((t, (elapsed * 1e6).round() / 1e6));
        }
    }
    content.push_str("Job finished\n");
    SyntheticLog { content, samples }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::scan_str;

    #[test]
    fn test_generate_log_is_deterministic() {
        let a = generate_log(&STRONG_SCALING_THREADS, 10.0, 0.9, 2, 7);
        let b = generate_log(&STRONG_SCALING_THREADS, 10.0, 0.9, 2, 7);
        assert_eq!(a.content, b.content);
        assert_eq!(a.samples.len(), 12);
        assert_eq!(a.lines(), 62);
    }

    #[test]
    fn test_generated_log_scans_back() {
        let log = generate_log(&STRONG_SCALING_THREADS, 2.0, 0.5, 3, 3);
        let samples = scan_str(&log.content);
        assert_eq!(samples.len(), log.samples.len());
        for (scanned, (threads, elapsed)) in samples.iter().zip(&log.samples) {
            assert_eq!(scanned.threads, *threads);
            assert!((scanned.elapsed_seconds - elapsed).abs() < 1e-9);
        }
    }
}

//! Speedup and parallel efficiency tables from OpenMP strong-scaling logs.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod bench_utils;
pub mod chart;
pub mod cli;
pub mod errors;
pub mod extractor;
pub mod metrics;
pub mod report;
pub mod sample;

pub use crate::chart::{SpeedupSeries, render_svg, write_chart};
pub use crate::errors::{ChartError, ErrorKind, ExtractionError};
pub use crate::extractor::{extract, extract_from_reader};
pub use crate::metrics::{MetricsRow, compute_rows};
pub use crate::report::ScalingReport;
pub use crate::sample::{LineScanner, Sample, ScanState, ThreadMarker};

//! Log file to [`ScalingReport`].

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::info;

use crate::{errors::ExtractionError, metrics::compute_rows, report::ScalingReport, sample::scan_reader};

pub fn extract<P: AsRef<Path>>(path: P, label: &str) -> Result<ScalingReport, ExtractionError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExtractionError::file_not_found(path));
    }
    let file = File::open(path).map_err(|e| ExtractionError::read(path, e))?;
    extract_from_reader(BufReader::new(file), path, label)
}

/// `path` only names the source in errors and logs.
pub fn extract_from_reader<R: BufRead, P: AsRef<Path>>(
    reader: R,
    path: P,
    label: &str,
) -> Result<ScalingReport, ExtractionError> {
    let path = path.as_ref();
    let samples = scan_reader(reader).map_err(|e| ExtractionError::read(path, e))?;
    if samples.is_empty() {
        return Err(ExtractionError::no_data(path, label));
    }
    let rows = compute_rows(&samples).ok_or_else(|| ExtractionError::missing_baseline(path, label))?;
    info!(
        label,
        path = %path.display(),
        rows = rows.len(),
        "scaling table ready"
    );
    Ok(ScalingReport::new(label, rows))
}

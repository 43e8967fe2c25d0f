use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure categories of a single log extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    NoDataFound,
    MissingBaseline,
    ReadError,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("file '{}' not found", .0.display())]
    FileNotFound(PathBuf),
    #[error("no {label} timing data found in '{}'", .path.display())]
    NoDataFound { path: PathBuf, label: String },
    #[error("no single-thread {label} timing found in '{}'", .path.display())]
    MissingBaseline { path: PathBuf, label: String },
    #[error("failed to read '{}': {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractionError {
    pub fn file_not_found<P: AsRef<Path>>(path: P) -> Self {
        ExtractionError::FileNotFound(path.as_ref().to_path_buf())
    }

    pub fn no_data<P: AsRef<Path>, T: Into<String>>(path: P, label: T) -> Self {
        ExtractionError::NoDataFound {
            path: path.as_ref().to_path_buf(),
            label: label.into(),
        }
    }

    pub fn missing_baseline<P: AsRef<Path>, T: Into<String>>(path: P, label: T) -> Self {
        ExtractionError::MissingBaseline {
            path: path.as_ref().to_path_buf(),
            label: label.into(),
        }
    }

    pub fn read<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        ExtractionError::ReadError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::FileNotFound(_) => ErrorKind::FileNotFound,
            ExtractionError::NoDataFound { .. } => ErrorKind::NoDataFound,
            ExtractionError::MissingBaseline { .. } => ErrorKind::MissingBaseline,
            ExtractionError::ReadError { .. } => ErrorKind::ReadError,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ExtractionError::FileNotFound(path)
            | ExtractionError::NoDataFound { path, .. }
            | ExtractionError::MissingBaseline { path, .. }
            | ExtractionError::ReadError { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart '{0}' has no data points")]
    EmptySeries(String),
    #[error("failed to write chart '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChartError {
    pub fn empty<T: Into<String>>(title: T) -> Self {
        ChartError::EmptySeries(title.into())
    }

    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        ChartError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

use std::path::{Path, PathBuf};

pub const DEFAULT_RUNS: [(&str, &str); 2] = [
    ("GCC", "strong_gcc_52375392.out"),
    ("ICC", "strong_icc_52375394.out"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSpec {
    pub label: String,
    pub path: PathBuf,
}

impl RunSpec {
    pub fn new<T: Into<String>, P: Into<PathBuf>>(label: T, path: P) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// Parses `LABEL=PATH`.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.split_once('=') {
            Some((label, path)) if !label.is_empty() && !path.is_empty() => {
                Ok(Self::new(label, path))
            }
            _ => Err(format!("--run expects LABEL=PATH, got '{value}'")),
        }
    }

    pub fn from_path(path: &str) -> Self {
        let label = Path::new(path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());
        Self::new(label, path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub runs: Vec<RunSpec>,
    pub chart_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut runs = Vec::new();
        let mut chart_dir = None;
        let mut verbose = false;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--run" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--run requires a value".to_string())?;
                    runs.push(RunSpec::parse(value)?);
                }
                "--chart-dir" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--chart-dir requires a value".to_string())?;
                    chart_dir = Some(PathBuf::from(value));
                }
                "--verbose" | "-v" => verbose = true,
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                path => runs.push(RunSpec::from_path(path)),
            }
        }
        if runs.is_empty() {
            runs = DEFAULT_RUNS
                .iter()
                .map(|(label, path)| RunSpec::new(*label, *path))
                .collect();
        }
        Ok(Self {
            runs,
            chart_dir,
            verbose,
        })
    }

    pub fn help() -> &'static str {
        "Usage: scalingreport [--run LABEL=PATH]... [PATH]... [--chart-dir DIR] [--verbose]\n\
         Without inputs, reads GCC=strong_gcc_52375392.out and ICC=strong_icc_52375394.out.\n"
    }
}

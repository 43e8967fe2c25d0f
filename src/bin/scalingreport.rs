use std::{env, path::Path, process};

use scalingreport::{
    ScalingReport, SpeedupSeries,
    chart::{chart_file_names, combined_title, single_title},
    cli::CommandLineConfig,
    extract, write_chart,
};
use tracing::{Level, warn};

const SEPARATOR_WIDTH: usize = 50;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let level = if config.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();

    let reports = print_reports(&config);
    if let Some(dir) = &config.chart_dir {
        write_charts(dir, &reports);
    }
}

/// Prints one table or error message per run and returns the successful reports.
fn print_reports(config: &CommandLineConfig) -> Vec<ScalingReport> {
    let separator = format!("\n{}\n", "=".repeat(SEPARATOR_WIDTH));
    let mut reports = Vec::new();
    for (idx, run) in config.runs.iter().enumerate() {
        if idx > 0 {
            println!("{separator}");
        }
        match extract(&run.path, &run.label) {
            Ok(report) => {
                println!("{report}");
                reports.push(report);
            }
            Err(err) => {
                warn!(kind = ?err.kind(), label = %run.label, "extraction failed");
                println!("error: {err}");
            }
        }
    }
    reports
}

fn write_charts(dir: &Path, reports: &[ScalingReport]) {
    let series: Vec<SpeedupSeries> = reports.iter().map(SpeedupSeries::from_report).collect();
    let with_combined = series.len() > 1;
    let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
    let mut file_names = chart_file_names(&labels, with_combined).into_iter();
    let mut jobs: Vec<(String, String, Vec<SpeedupSeries>)> = series
        .iter()
        .zip(file_names.by_ref())
        .map(|(s, file_name)| (file_name, single_title(&s.label), vec![s.clone()]))
        .collect();
    if let Some(file_name) = file_names.next() {
        jobs.push((file_name, combined_title(&series), series.clone()));
    }
    if let Err(err) = std::fs::create_dir_all(dir) {
        warn!(dir = %dir.display(), %err, "cannot create chart directory");
        println!("error: cannot create chart directory '{}': {err}", dir.display());
        return;
    }
    for (file_name, title, chart_series) in jobs {
        let path = dir.join(file_name);
        match write_chart(&path, &title, &chart_series) {
            Ok(()) => println!("chart saved to {}", path.display()),
            Err(err) => {
                warn!(%err, "chart not written");
                println!("error: {err}");
            }
        }
    }
}

//! Speedup curves rendered as standalone SVG documents.
//!
//! Every chart plots measured speedup against thread count together with
//! the ideal line `speedup == threads`.

use std::{collections::HashSet, fmt::Write as _, fs, path::Path};

use tracing::info;

use crate::{errors::ChartError, report::ScalingReport};

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
const PALETTE: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
];
const IDEAL_COLOR: &str = "#808080";

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedupSeries {
    pub label: String,
    pub points: Vec<(u32, f64)>,
}

impl SpeedupSeries {
    pub fn new<T: Into<String>>(label: T, points: Vec<(u32, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn from_report(report: &ScalingReport) -> Self {
        Self::new(report.label.clone(), report.speedup_series())
    }
}

pub fn single_title(label: &str) -> String {
    format!("{label} OpenMP Speedup Curve")
}

pub fn combined_title(series: &[SpeedupSeries]) -> String {
    let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
    format!("{} OpenMP Speedup Curve", labels.join(" vs "))
}

pub fn chart_file_name(suffix: &str) -> String {
    format!("speedup_curve_{suffix}.svg")
}

/// Lower-case file-name fragment for a label: `"Intel ICC"` becomes `"intel_icc"`.
pub fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "run".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File names for one chart per label plus, when `with_combined` is set,
/// the combined chart (always last). Colliding slugs get `_2`, `_3`, ...
pub fn chart_file_names(labels: &[&str], with_combined: bool) -> Vec<String> {
    let mut taken = HashSet::new();
    if with_combined {
        taken.insert("combined".to_string());
    }
    let mut names = Vec::with_capacity(labels.len() + 1);
    for label in labels {
        let base = slug(label);
        let mut candidate = base.clone();
        let mut n = 2;
        while !taken.insert(candidate.clone()) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        names.push(chart_file_name(&candidate));
    }
    if with_combined {
        names.push(chart_file_name("combined"));
    }
    names
}

struct Frame {
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Frame {
    fn fit(threads: &[u32], series: &[SpeedupSeries]) -> Self {
        let x_min = threads.first().copied().map(f64::from).unwrap_or(0.0);
        let mut x_max = threads.last().copied().map(f64::from).unwrap_or(1.0);
        if x_max <= x_min {
            x_max = x_min + 1.0;
        }
        let top_speedup = series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, speedup)| *speedup))
            .filter(|speedup| speedup.is_finite())
            .fold(0.0_f64, f64::max);
        let y_max = top_speedup.max(x_max) * 1.05;
        Self { x_min, x_max, y_max }
    }

    fn x(&self, threads: f64) -> f64 {
        let span = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        MARGIN_LEFT + (threads - self.x_min) / (self.x_max - self.x_min) * span
    }

    fn y(&self, speedup: f64) -> f64 {
        let span = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        HEIGHT - MARGIN_BOTTOM - speedup / self.y_max * span
    }
}

fn y_step(y_max: f64) -> f64 {
    let raw = y_max / 6.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn union_threads(series: &[SpeedupSeries]) -> Vec<u32> {
    let mut threads: Vec<u32> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(t, _)| *t))
        .collect();
    threads.sort_unstable();
    threads.dedup();
    threads
}

fn polyline(frame: &Frame, points: &[(f64, f64)], color: &str, dashed: bool) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", frame.x(*x), frame.y(*y)))
        .collect();
    let dash = if dashed { " stroke-dasharray=\"8,5\"" } else { "" };
    format!(
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"{dash}/>\n",
        coords.join(" ")
    )
}

fn marker(shape: usize, cx: f64, cy: f64, color: &str) -> String {
    match shape {
        1 => format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"8\" height=\"8\" fill=\"{color}\"/>\n",
            cx - 4.0,
            cy - 4.0
        ),
        2 => format!(
            "  <path d=\"M{:.1},{:.1} L{:.1},{:.1} M{:.1},{:.1} L{:.1},{:.1}\" stroke=\"{color}\" stroke-width=\"2\"/>\n",
            cx - 4.0,
            cy - 4.0,
            cx + 4.0,
            cy + 4.0,
            cx - 4.0,
            cy + 4.0,
            cx + 4.0,
            cy - 4.0
        ),
        _ => format!("  <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"4\" fill=\"{color}\"/>\n"),
    }
}

pub fn render_svg(title: &str, series: &[SpeedupSeries]) -> Result<String, ChartError> {
    if series.iter().all(|s| s.points.is_empty()) {
        return Err(ChartError::empty(title));
    }
    let threads = union_threads(series);
    let frame = Frame::fit(&threads, series);
    let left = MARGIN_LEFT;
    let right = WIDTH - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = HEIGHT - MARGIN_BOTTOM;

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\">"
    );
    svg.push_str("  <style>\n");
    svg.push_str("    text { font-family: sans-serif; font-size: 13px; fill: #222; }\n");
    svg.push_str("    .title { font-size: 18px; }\n");
    svg.push_str("    .grid { stroke: #bbb; stroke-dasharray: 2,3; }\n");
    svg.push_str("  </style>\n");
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
    let _ = writeln!(
        svg,
        "  <text class=\"title\" x=\"{:.1}\" y=\"35\" text-anchor=\"middle\">{}</text>",
        (left + right) / 2.0,
        escape(title)
    );

    for t in &threads {
        let x = frame.x(f64::from(*t));
        let _ = writeln!(
            svg,
            "  <line class=\"grid\" x1=\"{x:.1}\" y1=\"{top:.1}\" x2=\"{x:.1}\" y2=\"{bottom:.1}\"/>"
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{t}</text>",
            bottom + 20.0
        );
    }
    let step = y_step(frame.y_max);
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    let mut idx = 0u32;
    loop {
        let tick = f64::from(idx) * step;
        if tick > frame.y_max {
            break;
        }
        let y = frame.y(tick);
        let _ = writeln!(
            svg,
            "  <line class=\"grid\" x1=\"{left:.1}\" y1=\"{y:.1}\" x2=\"{right:.1}\" y2=\"{y:.1}\"/>"
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{tick:.decimals$}</text>",
            left - 8.0,
            y + 4.0
        );
        idx += 1;
    }
    let _ = writeln!(
        svg,
        "  <rect x=\"{left:.1}\" y=\"{top:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"#333\"/>",
        right - left,
        bottom - top
    );
    let _ = writeln!(
        svg,
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">Number of OpenMP Threads</text>",
        (left + right) / 2.0,
        HEIGHT - 20.0
    );
    let _ = writeln!(
        svg,
        "  <text x=\"20\" y=\"{:.1}\" text-anchor=\"middle\" transform=\"rotate(-90 20 {:.1})\">Speedup</text>",
        (top + bottom) / 2.0,
        (top + bottom) / 2.0
    );

    let ideal: Vec<(f64, f64)> = threads
        .iter()
        .map(|t| (f64::from(*t), f64::from(*t)))
        .collect();
    svg.push_str(&polyline(&frame, &ideal, IDEAL_COLOR, true));
    for (x, y) in &ideal {
        svg.push_str(&marker(2, frame.x(*x), frame.y(*y), IDEAL_COLOR));
    }

    let mut legend = Vec::new();
    for (idx, s) in series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let shape = if idx == 1 { 1 } else { 0 };
        let points: Vec<(f64, f64)> = s
            .points
            .iter()
            .filter(|(_, speedup)| speedup.is_finite())
            .map(|(t, speedup)| (f64::from(*t), *speedup))
            .collect();
        svg.push_str(&polyline(&frame, &points, color, false));
        for (x, y) in &points {
            svg.push_str(&marker(shape, frame.x(*x), frame.y(*y), color));
        }
        legend.push((format!("{} Actual Speedup", s.label), color, shape, false));
    }
    legend.push(("Ideal Speedup".to_string(), IDEAL_COLOR, 2, true));

    for (idx, (text, color, shape, dashed)) in legend.iter().enumerate() {
        let y = top + 20.0 + idx as f64 * 20.0;
        let x = left + 15.0;
        let dash = if *dashed { " stroke-dasharray=\"8,5\"" } else { "" };
        let _ = writeln!(
            svg,
            "  <line x1=\"{x:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"{color}\" stroke-width=\"2\"{dash}/>",
            x + 30.0
        );
        svg.push_str(&marker(*shape, x + 15.0, y, color));
        let _ = writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\">{}</text>",
            x + 40.0,
            y + 4.0,
            escape(text)
        );
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

pub fn write_chart<P: AsRef<Path>>(
    path: P,
    title: &str,
    series: &[SpeedupSeries],
) -> Result<(), ChartError> {
    let path = path.as_ref();
    let svg = render_svg(title, series)?;
    fs::write(path, svg).map_err(|e| ChartError::io(path, e))?;
    info!(path = %path.display(), title, "chart written");
    Ok(())
}

use std::fmt;

use crate::metrics::MetricsRow;

const HEADER: &str = "| Threads | Time (s) | Speedup | Efficiency |";
const RULE: &str = "|-----------------|--------------------|-----------------|-----------------------|";

#[derive(Clone, Debug, PartialEq)]
pub struct ScalingReport {
    pub label: String,
    pub rows: Vec<MetricsRow>,
}

impl ScalingReport {
    pub fn new<T: Into<String>>(label: T, rows: Vec<MetricsRow>) -> Self {
        Self {
            label: label.into(),
            rows,
        }
    }

    pub fn title(&self) -> String {
        format!("### {} OpenMP Strong Scaling", self.label)
    }

    /// `(threads, speedup)` pairs in row order, as consumed by the chart renderer.
    pub fn speedup_series(&self) -> Vec<(u32, f64)> {
        self.rows.iter().map(|row| (row.threads, row.speedup)).collect()
    }

    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title());
        out.push_str("\n\n");
        out.push_str(HEADER);
        out.push('\n');
        out.push_str(RULE);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format_row(row));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ScalingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_markdown())
    }
}

fn format_row(row: &MetricsRow) -> String {
    format!(
        "| {:<15} | {:<18.6} | {:<15.3} | {:<21.3} |",
        row.threads, row.elapsed_seconds, row.speedup, row.efficiency
    )
}

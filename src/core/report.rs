use crate::domain::model::{Aggregates, ColumnSummary, Metric, Table};
use std::fmt::Write;

pub const PREVIEW_ROWS: usize = 5;

/// 類似 pandas `head()` 的預覽表格
pub fn preview(table: &Table, rows: usize) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>3}", "");
    for metric in Metric::ALL {
        let _ = write!(out, " {:>12}", metric.column_name());
    }
    out.push('\n');

    for (index, record) in table.head(rows).iter().enumerate() {
        let _ = write!(out, "{:>3}", index);
        for metric in Metric::ALL {
            let _ = write!(out, " {:>12}", record.value(metric) as i64);
        }
        out.push('\n');
    }
    out
}

pub fn describe_table(summaries: &[ColumnSummary]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>6}", "");
    for summary in summaries {
        let _ = write!(out, " {:>12}", summary.metric.column_name());
    }
    out.push('\n');

    let rows: [(&str, fn(&ColumnSummary) -> f64); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.q25),
        ("50%", |s| s.median),
        ("75%", |s| s.q75),
        ("max", |s| s.max),
    ];
    for (label, value_of) in rows {
        let _ = write!(out, "{:>6}", label);
        for summary in summaries {
            let _ = write!(out, " {:>12.6}", value_of(summary));
        }
        out.push('\n');
    }
    out
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

pub fn summary_lines(aggregates: &Aggregates) -> Vec<String> {
    vec![
        format!(
            "Highest consumption year: {}",
            aggregates.peak_consumption.year
        ),
        format!("Highest death year: {}", aggregates.peak_deaths.year),
        format!(
            "Average death rate: {}",
            format_rate(aggregates.average_death_rate)
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator;
    use crate::core::synthesizer::{seeded_rng, Synthesizer};
    use crate::domain::ports::FieldBounds;

    fn seeded_table() -> Table {
        Synthesizer::new(2016, 10, FieldBounds::default()).generate(&mut seeded_rng(42))
    }

    #[test]
    fn test_preview_shows_header_and_five_rows() {
        let text = preview(&seeded_table(), PREVIEW_ROWS);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("Wine_Shops"));
        assert!(lines[0].contains("Age_51_plus"));
        assert!(lines[1].contains("2016"));
        assert!(lines[1].contains("236"));
        assert!(lines[5].contains("2020"));
    }

    #[test]
    fn test_format_rate_uses_two_decimals() {
        assert_eq!(format_rate(0.034509), "3.45%");
        assert_eq!(format_rate(0.1), "10.00%");
    }

    #[test]
    fn test_summary_lines_for_seed_42() {
        let aggregates = aggregator::aggregate(&seeded_table()).unwrap();
        let lines = summary_lines(&aggregates);
        assert_eq!(lines[0], "Highest consumption year: 2020");
        assert_eq!(lines[1], "Highest death year: 2019");
        assert_eq!(lines[2], "Average death rate: 3.45%");
    }

    #[test]
    fn test_describe_table_has_all_statistics() {
        let summaries = aggregator::describe(&seeded_table());
        let text = describe_table(&summaries);
        for label in ["count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
            assert!(text.lines().any(|l| l.trim_start().starts_with(label)));
        }
    }
}

use crate::domain::model::{Aggregates, ColumnSummary, CorrelationMatrix, Metric, Peak, Table};
use crate::utils::error::{DashboardError, Result};

pub fn aggregate(table: &Table) -> Result<Aggregates> {
    if table.is_empty() {
        return Err(DashboardError::EmptyTable);
    }

    let aggregates = Aggregates {
        peak_consumption: peak_of(table, |r| r.consumers)?,
        peak_deaths: peak_of(table, |r| r.deaths)?,
        correlation: correlation_matrix(table, &Metric::CORRELATED),
        average_death_rate: average_death_rate(table)?,
    };

    tracing::debug!(
        "Aggregated {} rows: peak consumption {} in {}, peak deaths {} in {}",
        table.len(),
        aggregates.peak_consumption.value,
        aggregates.peak_consumption.year,
        aggregates.peak_deaths.value,
        aggregates.peak_deaths.year
    );
    Ok(aggregates)
}

/// 最大值所在列；同值時取年份最早的一列
pub fn peak_of<F>(table: &Table, value_of: F) -> Result<Peak>
where
    F: Fn(&crate::domain::model::YearlyRecord) -> u32,
{
    let mut peak: Option<Peak> = None;
    for (index, record) in table.records().iter().enumerate() {
        let value = value_of(record);
        if peak.map_or(true, |p| value > p.value) {
            peak = Some(Peak {
                index,
                year: record.year,
                value,
            });
        }
    }
    peak.ok_or(DashboardError::EmptyTable)
}

/// Mean of the per-row `deaths / consumers` ratios.
pub fn average_death_rate(table: &Table) -> Result<f64> {
    if table.is_empty() {
        return Err(DashboardError::EmptyTable);
    }
    let total: f64 = table.records().iter().map(|r| r.death_rate()).sum();
    Ok(total / table.len() as f64)
}

pub fn correlation_matrix(table: &Table, metrics: &[Metric]) -> CorrelationMatrix {
    let columns: Vec<Vec<f64>> = metrics.iter().map(|m| table.column(*m)).collect();
    let n = metrics.len();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        values[i][i] = if variance_sum(&columns[i]) > 0.0 {
            1.0
        } else {
            f64::NAN
        };
        for j in (i + 1)..n {
            let r = pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        labels: metrics.to_vec(),
        values,
    }
}

/// Pearson correlation; `NaN` when either column has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return f64::NAN;
    }
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}

pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    Metric::ALL
        .iter()
        .map(|metric| summarize(*metric, &table.column(*metric)))
        .collect()
}

pub fn summarize(metric: Metric, values: &[f64]) -> ColumnSummary {
    let count = values.len();
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let std = if count > 1 {
        let m = mean(values);
        (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    ColumnSummary {
        metric,
        count,
        mean: if count > 0 { mean(values) } else { f64::NAN },
        std,
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// 線性內插分位數（與 pandas 預設相同），輸入須已排序
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance_sum(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum()
}

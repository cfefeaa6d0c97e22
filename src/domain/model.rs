use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One row of synthesized metrics for a single calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: i32,
    pub wine_shops: u32,
    pub consumers: u32,
    pub deaths: u32,
    pub age_18_30: u32,
    pub age_31_50: u32,
    /// consumers - age_18_30 - age_31_50，可能為負數
    pub age_51_plus: i64,
}

impl YearlyRecord {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Year => self.year as f64,
            Metric::WineShops => self.wine_shops as f64,
            Metric::Consumers => self.consumers as f64,
            Metric::Deaths => self.deaths as f64,
            Metric::Age18To30 => self.age_18_30 as f64,
            Metric::Age31To50 => self.age_31_50 as f64,
            Metric::Age51Plus => self.age_51_plus as f64,
        }
    }

    pub fn death_rate(&self) -> f64 {
        self.deaths as f64 / self.consumers as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Year,
    WineShops,
    Consumers,
    Deaths,
    Age18To30,
    Age31To50,
    Age51Plus,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Year,
        Metric::WineShops,
        Metric::Consumers,
        Metric::Deaths,
        Metric::Age18To30,
        Metric::Age31To50,
        Metric::Age51Plus,
    ];

    /// Columns that enter the correlation matrix, in matrix order.
    pub const CORRELATED: [Metric; 3] = [Metric::WineShops, Metric::Consumers, Metric::Deaths];

    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::Year => "Year",
            Metric::WineShops => "Wine_Shops",
            Metric::Consumers => "Consumers",
            Metric::Deaths => "Deaths",
            Metric::Age18To30 => "Age_18_30",
            Metric::Age31To50 => "Age_31_50",
            Metric::Age51Plus => "Age_51_plus",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Year => "Year",
            Metric::WineShops => "Wine Shops",
            Metric::Consumers => "Consumers",
            Metric::Deaths => "Deaths",
            Metric::Age18To30 => "18-30",
            Metric::Age31To50 => "31-50",
            Metric::Age51Plus => "51+",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Ordered, immutable table of yearly records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    records: Vec<YearlyRecord>,
}

impl Table {
    pub fn new(records: Vec<YearlyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[YearlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn head(&self, n: usize) -> &[YearlyRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn first(&self) -> Option<&YearlyRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&YearlyRecord> {
        self.records.last()
    }

    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn column(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| r.value(metric)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub index: usize,
    pub year: i32,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<Metric>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub peak_consumption: Peak,
    pub peak_deaths: Peak,
    pub correlation: CorrelationMatrix,
    pub average_death_rate: f64,
}

/// pandas `describe()` 的單欄結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub metric: Metric,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Rendered RGB8 chart surface.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Canvas {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; width as usize * height as usize * 3],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    Headless,
    #[default]
    Interactive,
}

/// Files written by one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardArtifacts {
    pub image: PathBuf,
    pub csv: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32) -> YearlyRecord {
        YearlyRecord {
            year,
            wine_shops: 150,
            consumers: 6000,
            deaths: 300,
            age_18_30: 2500,
            age_31_50: 2000,
            age_51_plus: 1500,
        }
    }

    #[test]
    fn test_table_head_is_clamped() {
        let table = Table::new(vec![record(2016), record(2017)]);
        assert_eq!(table.head(5).len(), 2);
        assert_eq!(table.head(1)[0].year, 2016);
        assert_eq!(table.years(), vec![2016, 2017]);
    }

    #[test]
    fn test_column_and_death_rate() {
        let table = Table::new(vec![record(2016)]);
        assert_eq!(table.column(Metric::Age51Plus), vec![1500.0]);
        assert!((table.records()[0].death_rate() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_blank_canvas_is_white() {
        let canvas = Canvas::blank(4, 3);
        assert_eq!(canvas.pixels.len(), 36);
        assert_eq!(canvas.pixel(3, 2), [255, 255, 255]);
    }
}

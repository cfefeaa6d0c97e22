use crate::domain::model::{Aggregates, Canvas, DashboardArtifacts, ExportMode, Table};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn resolve(&self, path: &str) -> PathBuf;
}

/// Half-open integer bounds `[low, high)` for one synthesized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub low: u32,
    pub high: u32,
}

impl Bounds {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBounds {
    pub wine_shops: Bounds,
    pub consumers: Bounds,
    pub deaths: Bounds,
    pub age_18_30: Bounds,
    pub age_31_50: Bounds,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            wine_shops: Bounds::new(100, 300),
            consumers: Bounds::new(5000, 10000),
            deaths: Bounds::new(100, 500),
            age_18_30: Bounds::new(2000, 4000),
            age_31_50: Bounds::new(1500, 3000),
        }
    }
}

pub trait ConfigProvider {
    fn seed(&self) -> u64;
    fn start_year(&self) -> i32;
    fn year_count(&self) -> usize;
    fn bounds(&self) -> FieldBounds;

    fn canvas_size(&self) -> (u32, u32);
    fn footer_height(&self) -> u32;
    fn background_path(&self) -> &str;
    fn author(&self) -> &str;
    fn footer_year(&self) -> i32;

    fn image_file(&self) -> &str;
    fn csv_file(&self) -> Option<&str>;
    fn summary_json_file(&self) -> Option<&str>;
    fn export_mode(&self) -> ExportMode;
}

/// Shows a finished dashboard to the user and waits for acknowledgment.
pub trait Viewer {
    fn present(&self, image: &Path) -> Result<()>;
}

pub trait Pipeline {
    fn synthesize(&self) -> Result<Table>;
    fn aggregate(&self, table: &Table) -> Result<Aggregates>;
    fn render(&self, table: &Table, aggregates: &Aggregates) -> Result<Canvas>;
    fn export(
        &self,
        table: &Table,
        aggregates: &Aggregates,
        canvas: &Canvas,
    ) -> Result<DashboardArtifacts>;
}

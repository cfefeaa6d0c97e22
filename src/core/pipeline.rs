use crate::core::{aggregator, synthesizer};
use crate::domain::model::{
    Aggregates, Canvas, CorrelationMatrix, DashboardArtifacts, ExportMode, Metric, Peak, Table,
};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage, Viewer};
use crate::render::Renderer;
use crate::utils::error::{DashboardError, Result};
use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat, RgbImage};
use serde::Serialize;
use std::io::Cursor;
use std::path::PathBuf;

/// JSON 摘要的輸出格式
#[derive(Debug, Serialize)]
pub struct DashboardSummary<'a> {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub first_year: i32,
    pub last_year: i32,
    pub peak_consumption: &'a Peak,
    pub peak_deaths: &'a Peak,
    pub average_death_rate: f64,
    pub average_death_rate_display: String,
    pub correlation: &'a CorrelationMatrix,
}

pub struct DashboardPipeline<S: Storage, C: ConfigProvider, V: Viewer> {
    storage: S,
    config: C,
    viewer: V,
}

impl<S: Storage, C: ConfigProvider, V: Viewer> DashboardPipeline<S, C, V> {
    pub fn new(storage: S, config: C, viewer: V) -> Self {
        Self {
            storage,
            config,
            viewer,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn write_image(&self, canvas: &Canvas) -> Result<PathBuf> {
        let image = RgbImage::from_raw(canvas.width, canvas.height, canvas.pixels.clone())
            .ok_or_else(|| DashboardError::RenderError {
                message: format!(
                    "canvas buffer of {} bytes does not match {}x{}",
                    canvas.pixels.len(),
                    canvas.width,
                    canvas.height
                ),
            })?;

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

        let file = self.config.image_file();
        tracing::debug!("Writing PNG ({} bytes) to storage", bytes.len());
        self.storage.write_file(file, &bytes)?;
        Ok(self.storage.resolve(file))
    }

    fn write_csv(&self, table: &Table, file: &str) -> Result<PathBuf> {
        let data = table_to_csv(table)?;
        self.storage.write_file(file, &data)?;
        Ok(self.storage.resolve(file))
    }

    fn write_summary(&self, table: &Table, aggregates: &Aggregates, file: &str) -> Result<PathBuf> {
        let summary = DashboardSummary {
            generated_at: Utc::now(),
            seed: self.config.seed(),
            first_year: table.first().map_or(0, |r| r.year),
            last_year: table.last().map_or(0, |r| r.year),
            peak_consumption: &aggregates.peak_consumption,
            peak_deaths: &aggregates.peak_deaths,
            average_death_rate: aggregates.average_death_rate,
            average_death_rate_display: crate::core::report::format_rate(
                aggregates.average_death_rate,
            ),
            correlation: &aggregates.correlation,
        };
        let json = serde_json::to_string_pretty(&summary)?;
        self.storage.write_file(file, json.as_bytes())?;
        Ok(self.storage.resolve(file))
    }
}

/// 表格轉成 CSV，欄位名稱與預覽表頭相同
pub fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(Metric::ALL.iter().map(|m| m.column_name()))?;
    for record in table.records() {
        writer.write_record(
            Metric::ALL
                .iter()
                .map(|m| (record.value(*m) as i64).to_string()),
        )?;
    }
    writer
        .into_inner()
        .map_err(|e| DashboardError::IoError(e.into_error()))
}

impl<S: Storage, C: ConfigProvider, V: Viewer> Pipeline for DashboardPipeline<S, C, V> {
    fn synthesize(&self) -> Result<Table> {
        let mut rng = synthesizer::seeded_rng(self.config.seed());
        let table = synthesizer::Synthesizer::new(
            self.config.start_year(),
            self.config.year_count(),
            self.config.bounds(),
        )
        .generate(&mut rng);
        Ok(table)
    }

    fn aggregate(&self, table: &Table) -> Result<Aggregates> {
        aggregator::aggregate(table)
    }

    fn render(&self, table: &Table, aggregates: &Aggregates) -> Result<Canvas> {
        let background = PathBuf::from(self.config.background_path());
        Renderer::from_config(&self.config, background).render(table, aggregates)
    }

    fn export(
        &self,
        table: &Table,
        aggregates: &Aggregates,
        canvas: &Canvas,
    ) -> Result<DashboardArtifacts> {
        let image = self.write_image(canvas)?;
        tracing::info!("💾 Dashboard saved to {}", image.display());

        let csv = match self.config.csv_file() {
            Some(file) => Some(self.write_csv(table, file)?),
            None => None,
        };
        let summary_json = match self.config.summary_json_file() {
            Some(file) => Some(self.write_summary(table, aggregates, file)?),
            None => None,
        };

        match self.config.export_mode() {
            ExportMode::Interactive => self.viewer.present(&image)?,
            ExportMode::Headless => tracing::debug!("Headless mode, skipping viewer"),
        }

        Ok(DashboardArtifacts {
            image,
            csv,
            summary_json,
        })
    }
}

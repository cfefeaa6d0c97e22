// 儀表板繪製：背景、四個子圖、摘要文字與頁尾
pub mod background;
pub mod overlay;
pub mod palette;
pub mod panels;

use crate::domain::model::{Aggregates, Canvas, Table};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DashboardError, Result};
use background::BACKGROUND_ALPHA;
use palette::DARK_SLATE;
use plotters::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Renderer {
    width: u32,
    height: u32,
    footer_height: u32,
    background: PathBuf,
    author: String,
    footer_year: i32,
}

impl Renderer {
    pub fn new(
        (width, height): (u32, u32),
        footer_height: u32,
        background: impl Into<PathBuf>,
        author: impl Into<String>,
        footer_year: i32,
    ) -> Self {
        Self {
            width,
            height,
            footer_height,
            background: background.into(),
            author: author.into(),
            footer_year,
        }
    }

    /// `background` 需已解析成實際路徑
    pub fn from_config<C: ConfigProvider>(config: &C, background: PathBuf) -> Self {
        Self::new(
            config.canvas_size(),
            config.footer_height(),
            background,
            config.author(),
            config.footer_year(),
        )
    }

    pub fn render(&self, table: &Table, aggregates: &Aggregates) -> Result<Canvas> {
        if table.is_empty() {
            return Err(DashboardError::EmptyTable);
        }
        if self.footer_height >= self.height {
            return Err(DashboardError::RenderError {
                message: format!(
                    "footer height {} leaves no room on a {}px canvas",
                    self.footer_height, self.height
                ),
            });
        }

        let mut canvas = Canvas::blank(self.width, self.height);
        match background::load_background(&self.background, (self.width, self.height))? {
            Some(image) => {
                tracing::debug!("Blending background {}", self.background.display());
                background::blend_under(&mut canvas, &image, BACKGROUND_ALPHA);
            }
            None => tracing::warn!(
                "⚠️ Background image '{}' not found. Proceeding without it.",
                self.background.display()
            ),
        }

        self.draw(&mut canvas, table, aggregates)?;
        tracing::info!("🎨 Rendered {}x{} dashboard", self.width, self.height);
        Ok(canvas)
    }

    fn draw(&self, canvas: &mut Canvas, table: &Table, aggregates: &Aggregates) -> Result<()> {
        let root = BitMapBackend::with_buffer(&mut canvas.pixels, (self.width, self.height))
            .into_drawing_area();
        let (figure, footer) = root.split_vertically(self.height - self.footer_height);

        let body = figure.titled(
            &overlay::suptitle(table),
            panels::text_style(26, true, &DARK_SLATE),
        )?;
        let (_, body_height) = body.dim_in_pixel();
        let (grid, note) =
            body.split_vertically(body_height.saturating_sub(overlay::NOTE_HEIGHT));

        let cells = grid.split_evenly((2, 2));
        panels::draw_bar_panel(&cells[0], table)?;
        panels::draw_line_panel(
            &cells[1],
            table,
            &aggregates.peak_consumption,
            &aggregates.peak_deaths,
        )?;
        panels::draw_pie_panel(&cells[2], table)?;
        panels::draw_heatmap_panel(&cells[3], &aggregates.correlation)?;

        overlay::draw_summary_note(&note, aggregates)?;
        overlay::draw_footer(&footer, &self.author, self.footer_year)?;
        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator;
    use crate::core::synthesizer::{seeded_rng, Synthesizer};
    use crate::domain::ports::FieldBounds;
    use crate::utils::logger::capture_logs;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn seeded() -> (Table, Aggregates) {
        let table =
            Synthesizer::new(2016, 10, FieldBounds::default()).generate(&mut seeded_rng(42));
        let aggregates = aggregator::aggregate(&table).unwrap();
        (table, aggregates)
    }

    #[test]
    fn test_render_without_background() {
        let dir = TempDir::new().unwrap();
        let (table, aggregates) = seeded();
        let renderer = Renderer::new(
            (1400, 1080),
            80,
            dir.path().join("missing.jpg"),
            "Gautam",
            2025,
        );

        let canvas = renderer.render(&table, &aggregates).unwrap();
        assert_eq!((canvas.width, canvas.height), (1400, 1080));
        assert_eq!(canvas.pixels.len(), 1400 * 1080 * 3);
        assert!(canvas.pixels.iter().any(|b| *b != 255));
        // 左上角沒有背景時保持白色
        assert_eq!(canvas.pixel(0, 0), [255, 255, 255]);
    }

    #[test]
    fn test_render_blends_existing_background() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bg.png");
        RgbImage::from_pixel(20, 20, Rgb([0, 0, 0])).save(&path).unwrap();
        let (table, aggregates) = seeded();

        let canvas = Renderer::new((700, 540), 40, &path, "Gautam", 2025)
            .render(&table, &aggregates)
            .unwrap();
        assert_eq!(canvas.pixel(0, 0), [204, 204, 204]);
    }

    #[test]
    fn test_missing_background_logs_warning() {
        let dir = TempDir::new().unwrap();
        let (table, aggregates) = seeded();
        let missing = dir.path().join("missing.jpg");
        let renderer = Renderer::new((700, 540), 40, &missing, "Gautam", 2025);

        let output = capture_logs("alcohol_impact=info", || {
            renderer.render(&table, &aggregates).unwrap();
        });
        assert!(output.contains(&format!(
            "Background image '{}' not found. Proceeding without it.",
            missing.display()
        )));
        assert!(output.contains("Rendered 700x540 dashboard"));
    }

    #[test]
    fn test_existing_background_logs_no_warning() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bg.png");
        RgbImage::from_pixel(20, 20, Rgb([0, 0, 0])).save(&path).unwrap();
        let (table, aggregates) = seeded();
        let renderer = Renderer::new((700, 540), 40, &path, "Gautam", 2025);

        let output = capture_logs("alcohol_impact=info", || {
            renderer.render(&table, &aggregates).unwrap();
        });
        assert!(!output.contains("not found. Proceeding without it."));
        assert!(output.contains("Rendered 700x540 dashboard"));
    }

    #[test]
    fn test_render_rejects_oversized_footer() {
        let (table, aggregates) = seeded();
        let err = Renderer::new((400, 100), 100, "missing.jpg", "Gautam", 2025)
            .render(&table, &aggregates)
            .unwrap_err();
        assert!(matches!(err, DashboardError::RenderError { .. }));
    }

    #[test]
    fn test_render_handles_negative_age_share() {
        // seed 42 的最後一年為正值，這裡改用負值確認不會失敗
        let (table, aggregates) = seeded();
        let mut records = table.records().to_vec();
        if let Some(last) = records.last_mut() {
            last.age_51_plus = -367;
        }
        let table = Table::new(records);
        let dir = TempDir::new().unwrap();
        let canvas = Renderer::new((700, 540), 40, dir.path().join("none.jpg"), "A", 2025)
            .render(&table, &aggregates)
            .unwrap();
        assert_eq!(canvas.width, 700);
    }
}

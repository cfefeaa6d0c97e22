use crate::domain::model::ExportMode;
use crate::domain::ports::{ConfigProvider, FieldBounds};
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub export: ExportConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub seed: u64,
    pub start_year: i32,
    pub years: usize,
    pub bounds: FieldBounds,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_year: 2016,
            years: 10,
            bounds: FieldBounds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub footer_height: u32,
    pub background: String,
    pub author: String,
    pub footer_year: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 1080,
            footer_height: 80,
            background: "consuming alchol.jpg".to_string(),
            author: "Gautam".to_string(),
            footer_year: 2025,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
    pub image: String,
    pub csv: Option<String>,
    pub summary_json: Option<String>,
    pub mode: ExportMode,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            image: "alcohol_dashboard.png".to_string(),
            csv: None,
            summary_json: None,
            mode: ExportMode::Interactive,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl DashboardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 檔案存在就載入，不存在就使用預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            Self::from_file(path)
        } else {
            tracing::debug!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let synthesis = &self.synthesis;
        validation::validate_positive_number("synthesis.years", synthesis.years, 1)?;
        // 年份加總不可溢位
        validation::validate_range(
            "synthesis.start_year",
            synthesis.start_year as i64,
            i32::MIN as i64,
            i32::MAX as i64 - synthesis.years as i64,
        )?;

        let b = &synthesis.bounds;
        let fields = [
            ("synthesis.bounds.wine_shops", b.wine_shops),
            ("synthesis.bounds.consumers", b.consumers),
            ("synthesis.bounds.deaths", b.deaths),
            ("synthesis.bounds.age_18_30", b.age_18_30),
            ("synthesis.bounds.age_31_50", b.age_31_50),
        ];
        for (field, bounds) in fields {
            validation::validate_bounds(field, bounds.low, bounds.high)?;
        }

        let render = &self.render;
        validation::validate_range("render.width", render.width, 320, 8000)?;
        validation::validate_range("render.height", render.height, 240, 8000)?;
        validation::validate_range(
            "render.footer_height",
            render.footer_height,
            0,
            render.height / 2,
        )?;
        validation::validate_non_empty_string("render.author", &render.author)?;

        validation::validate_path("export.output_dir", &self.export.output_dir)?;
        validation::validate_path("export.image", &self.export.image)?;
        validation::validate_file_extension("export.image", &self.export.image, &["png"])?;
        if let Some(csv) = &self.export.csv {
            validation::validate_file_extension("export.csv", csv, &["csv"])?;
        }
        if let Some(json) = &self.export.summary_json {
            validation::validate_file_extension("export.summary_json", json, &["json"])?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for DashboardConfig {
    fn seed(&self) -> u64 {
        self.synthesis.seed
    }

    fn start_year(&self) -> i32 {
        self.synthesis.start_year
    }

    fn year_count(&self) -> usize {
        self.synthesis.years
    }

    fn bounds(&self) -> FieldBounds {
        self.synthesis.bounds
    }

    fn canvas_size(&self) -> (u32, u32) {
        (self.render.width, self.render.height)
    }

    fn footer_height(&self) -> u32 {
        self.render.footer_height
    }

    fn background_path(&self) -> &str {
        &self.render.background
    }

    fn author(&self) -> &str {
        &self.render.author
    }

    fn footer_year(&self) -> i32 {
        self.render.footer_year
    }

    fn image_file(&self) -> &str {
        &self.export.image
    }

    fn csv_file(&self) -> Option<&str> {
        self.export.csv.as_deref()
    }

    fn summary_json_file(&self) -> Option<&str> {
        self.export.summary_json.as_deref()
    }

    fn export_mode(&self) -> ExportMode {
        self.export.mode
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Bounds;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_dashboard_constants() {
        let config = DashboardConfig::default();
        assert_eq!(config.seed(), 42);
        assert_eq!(config.start_year(), 2016);
        assert_eq!(config.year_count(), 10);
        assert_eq!(config.bounds().consumers, Bounds::new(5000, 10000));
        assert_eq!(config.image_file(), "alcohol_dashboard.png");
        assert_eq!(config.background_path(), "consuming alchol.jpg");
        assert_eq!(config.export_mode(), ExportMode::Interactive);
        assert!(config.csv_file().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[synthesis]
seed = 7
years = 5

[synthesis.bounds]
wine_shops = { low = 10, high = 20 }
consumers = { low = 5000, high = 10000 }
deaths = { low = 100, high = 500 }
age_18_30 = { low = 2000, high = 4000 }
age_31_50 = { low = 1500, high = 3000 }

[export]
mode = "headless"
csv = "data.csv"

[monitoring]
enabled = true
"#;

        let config = DashboardConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.seed(), 7);
        assert_eq!(config.year_count(), 5);
        assert_eq!(config.start_year(), 2016);
        assert_eq!(config.bounds().wine_shops, Bounds::new(10, 20));
        assert_eq!(config.export_mode(), ExportMode::Headless);
        assert_eq!(config.csv_file(), Some("data.csv"));
        assert_eq!(config.image_file(), "alcohol_dashboard.png");
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ALCOHOL_IMPACT_TEST_DIR", "/tmp/dashboards");
        let toml_content = r#"
[export]
output_dir = "${ALCOHOL_IMPACT_TEST_DIR}"
image = "${ALCOHOL_IMPACT_UNDEFINED_VAR}.png"
"#;

        let config = DashboardConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.export.output_dir, "/tmp/dashboards");
        assert_eq!(config.export.image, "${ALCOHOL_IMPACT_UNDEFINED_VAR}.png");
        std::env::remove_var("ALCOHOL_IMPACT_TEST_DIR");
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let mut config = DashboardConfig::default();
        config.synthesis.bounds.deaths = Bounds::new(500, 100);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("synthesis.bounds.deaths"));
    }

    #[test]
    fn test_every_bounds_field_is_validated() {
        let fields: [(&str, fn(&mut FieldBounds) -> &mut Bounds); 5] = [
            ("synthesis.bounds.wine_shops", |b| &mut b.wine_shops),
            ("synthesis.bounds.consumers", |b| &mut b.consumers),
            ("synthesis.bounds.deaths", |b| &mut b.deaths),
            ("synthesis.bounds.age_18_30", |b| &mut b.age_18_30),
            ("synthesis.bounds.age_31_50", |b| &mut b.age_31_50),
        ];
        for (field, bounds_of) in fields {
            let mut config = DashboardConfig::default();
            *bounds_of(&mut config.synthesis.bounds) = Bounds::new(10, 10);
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn test_footer_taller_than_half_canvas_rejected() {
        let mut config = DashboardConfig::default();
        config.render.footer_height = config.render.height / 2 + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render.footer_height"));
    }

    #[test]
    fn test_zero_years_rejected() {
        let mut config = DashboardConfig::default();
        config.synthesis.years = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_png_output_rejected() {
        let mut config = DashboardConfig::default();
        config.export.image = "dashboard.jpg".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = DashboardConfig::from_toml_str("[synthesis\nseed = 1").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nauthor = \"Data Team\"\nfooter_year = 2026").unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.author(), "Data Team");
        assert_eq!(config.footer_year(), 2026);
        assert_eq!(config.canvas_size(), (1400, 1080));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = DashboardConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.seed(), 42);
    }
}

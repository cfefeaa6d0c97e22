pub mod toml_config;

pub use toml_config::DashboardConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "alcohol-dashboard")]
#[command(about = "Synthesize alcohol impact statistics and render a chart dashboard")]
pub struct CliConfig {
    /// Path to the TOML configuration file (defaults are used when it is missing)
    #[arg(short, long, default_value = toml_config::DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the dashboard and exit without opening a viewer or waiting for Enter
    #[arg(long)]
    pub headless: bool,

    /// Override the generator seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Log CPU and memory usage per phase
    #[arg(long)]
    pub monitor: bool,

    /// Show the resolved configuration without generating anything
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut DashboardConfig) {
        if self.headless {
            config.export.mode = crate::domain::model::ExportMode::Headless;
            tracing::info!("🔧 Export mode overridden to: headless");
        }
        if let Some(seed) = self.seed {
            config.synthesis.seed = seed;
            tracing::info!("🔧 Seed overridden to: {}", seed);
        }
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.clone();
            tracing::info!("🔧 Output directory overridden to: {}", dir);
        }
        if self.monitor {
            config.monitoring = Some(toml_config::MonitoringConfig { enabled: true });
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::model::ExportMode;
    use crate::domain::ports::ConfigProvider;

    #[test]
    fn test_cli_overrides_take_precedence() {
        let cli = CliConfig::parse_from([
            "alcohol-dashboard",
            "--headless",
            "--seed",
            "7",
            "--output-dir",
            "out",
            "--monitor",
        ]);
        let mut config = DashboardConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.export_mode(), ExportMode::Headless);
        assert_eq!(config.seed(), 7);
        assert_eq!(config.export.output_dir, "out");
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_cli_defaults_leave_config_untouched() {
        let cli = CliConfig::parse_from(["alcohol-dashboard"]);
        assert_eq!(cli.config, "dashboard.toml");

        let mut config = DashboardConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.export_mode(), ExportMode::Interactive);
        assert_eq!(config.seed(), 42);
        assert!(!config.monitoring_enabled());
    }
}

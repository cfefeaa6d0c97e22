use alcohol_impact::domain::ports::ConfigProvider;
use alcohol_impact::utils::error::ErrorSeverity;
use alcohol_impact::utils::{logger, validation::Validate};
use alcohol_impact::{
    CliConfig, DashboardConfig, DashboardEngine, DashboardError, DashboardPipeline, LocalStorage,
    SystemViewer,
};
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting alcohol-dashboard");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match DashboardConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    if cli.dry_run {
        tracing::info!("🔍 Dry run, nothing will be generated");
        println!("{}", toml::to_string_pretty(&config)?);
        println!(
            "Would write {} to {}",
            config.image_file(),
            config.export.output_dir
        );
        return Ok(());
    }

    let monitor_enabled = config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(config.export.output_dir.clone());
    let pipeline = DashboardPipeline::new(storage, config, SystemViewer::new());
    let engine = DashboardEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(artifacts) => {
            tracing::info!("✅ Dashboard generated successfully!");
            println!("✅ Dashboard generated successfully!");
            println!("📁 Image saved to: {}", artifacts.image.display());
            if let Some(csv) = &artifacts.csv {
                println!("📁 Table saved to: {}", csv.display());
            }
            if let Some(summary) = &artifacts.summary_json {
                println!("📁 Summary saved to: {}", summary.display());
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Dashboard generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            let code = exit_code(e.severity());
            report_error(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

fn report_error(e: &DashboardError) {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
}

fn fail(e: &DashboardError) -> ! {
    report_error(e);
    std::process::exit(exit_code(e.severity()).max(1))
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

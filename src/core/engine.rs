use crate::core::{aggregator, report};
use crate::domain::model::DashboardArtifacts;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct DashboardEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> DashboardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// synthesize → aggregate → (console report) → render → export
    pub fn run(&self) -> Result<DashboardArtifacts> {
        tracing::info!("🚀 Starting dashboard pipeline");
        self.monitor.log_stats("start");

        tracing::info!("🎲 Synthesizing data...");
        let table = self.pipeline.synthesize()?;
        tracing::info!("Synthesized {} yearly records", table.len());
        self.monitor.log_stats("synthesize");

        tracing::info!("📊 Aggregating...");
        let aggregates = self.pipeline.aggregate(&table)?;
        self.monitor.log_stats("aggregate");

        println!("{}", report::preview(&table, report::PREVIEW_ROWS));
        println!("{}", report::describe_table(&aggregator::describe(&table)));
        for line in report::summary_lines(&aggregates) {
            println!("{}", line);
        }

        tracing::info!("🎨 Rendering dashboard...");
        let canvas = self.pipeline.render(&table, &aggregates)?;
        self.monitor.log_stats("render");

        tracing::info!("📦 Exporting...");
        let artifacts = self.pipeline.export(&table, &aggregates, &canvas)?;
        self.monitor.log_stats("export");
        self.monitor.log_final_stats();

        tracing::info!("✅ Dashboard pipeline finished");
        Ok(artifacts)
    }
}

pub mod aggregator;
pub mod engine;
pub mod pipeline;
pub mod report;
pub mod synthesizer;

pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, Viewer};
pub use crate::utils::error::Result;
pub use engine::DashboardEngine;
pub use pipeline::DashboardPipeline;

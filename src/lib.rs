pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{engine::DashboardEngine, pipeline::DashboardPipeline};
pub use adapters::{LocalStorage, SystemViewer};
pub use config::DashboardConfig;
pub use utils::error::{DashboardError, Result};

// Adapters layer: concrete implementations for external systems (filesystem, image viewer)
pub mod storage;
pub mod viewer;

pub use storage::LocalStorage;
pub use viewer::SystemViewer;

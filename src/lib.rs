pub mod app;
pub mod config;
pub mod errors;
pub mod fit;
pub mod measure;
pub mod split;
pub mod token;
pub mod ui;

// Re-export commonly used types
pub use app::{AppMode, AppState};
pub use crate::config::Config;
pub use errors::FitError;
pub use fit::{fit, try_fit, FitResult};
pub use measure::{CellOracle, FontSpec, MeasureContext, WidthOracle};
pub use split::split_at_tail;

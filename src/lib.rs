pub mod ai;
pub mod config;
pub mod core;
pub mod error;
pub mod runner;
pub mod utils;

// Re-export key items for convenience
pub use ai::{ExternalOptimizer, SimulatedOptimizer};
pub use config::{OptimizationLevel, OptimizationMethod, TrimConfig};
pub use crate::core::{OptimizeRequest, OptimizeResponse, TransformationResult};
pub use error::OptimizeError;
pub use runner::{handle_request, handle_with_config, optimize_batch, transform};
pub use utils::compress::optimize;
pub use utils::tokens::{SavingsReport, estimate_tokens};

// PGX Dash - terminal dashboard for pharmacogenomic risk analysis

pub mod api;
pub mod caveats;
pub mod config;
pub mod drugs;
pub mod export;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;      // Terminal User Interface
pub mod types;
pub mod vcf;      // Upload validation (header sniffing, not parsing)

// Re-exports for convenience
pub use config::Config;
pub use models::AnalysisReport;
pub use types::{AppError, AppResult};

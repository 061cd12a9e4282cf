// serp-audit - live HTTP status audit of a site's Google results

pub mod audit;
pub mod cli;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod preflight;
pub mod report;
pub mod search;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::AuditConfig;
pub use pipeline::{AuditRun, AuditSummary, Orchestrator};
pub use types::{AuditError, AuditResult};

//! Startup checks, run before any network traffic.
//!
//! Both checks exist so that a run which cannot succeed fails before it
//! spends SerpAPI quota.

use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::audit::ReqwestProber;
use crate::config::AuditConfig;
use crate::search::SerpApiBackend;
use crate::types::{AuditError, AuditResult};

/// Clients verified to be usable for this run.
pub struct Capabilities {
    pub backend: SerpApiBackend,
    pub prober: ReqwestProber,
}

/// Open the output for writing, write nothing and close it.
///
/// This truncates an existing report, matching the rewrite that follows.
pub fn assert_writable(path: &Path) -> AuditResult<()> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| AuditError::OutputNotWritable {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), "Output file is writable");
    Ok(())
}

/// Build the search backend and the HTTP client, reporting which one is
/// unusable instead of failing later mid-run.
pub fn check_capabilities(config: &AuditConfig) -> AuditResult<Capabilities> {
    let backend = SerpApiBackend::from_config(&config.search)?;
    let prober = ReqwestProber::new(config.probe.timeout)
        .map_err(|e| AuditError::Capability(format!("HTTP client unavailable: {e}")))?;

    debug!("Capability check passed");
    Ok(Capabilities { backend, prober })
}

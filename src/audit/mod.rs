//! URL Audit Module
//!
//! Resolves the live HTTP status of each search result:
//! - HEAD first, since it is cheap for both sides
//! - a single GET retry when HEAD fails at the transport level
//!   (some servers drop or reject HEAD outright)
//!
//! Status codes are labelled from a fixed table and bucketed into
//! [`StatusClass`] for the run summary.

pub mod auditor;
pub mod prober;
pub mod status;

pub use auditor::UrlAuditor;
pub use prober::{ProbeError, ProbeMethod, ProbeResponse, Prober, ReqwestProber};
pub use status::StatusClass;

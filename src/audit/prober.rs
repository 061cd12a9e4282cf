//! Network access for URL probes.
//!
//! The [`Prober`] trait is the seam between the fallback policy in
//! [`super::auditor`] and the actual HTTP client, so the policy can be
//! exercised without a network.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Maximum number of redirects followed for one probe.
const MAX_REDIRECTS: usize = 10;

const USER_AGENT: &str = concat!("serp-audit/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Head,
    Get,
}

impl std::fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeMethod::Head => write!(f, "HEAD"),
            ProbeMethod::Get => write!(f, "GET"),
        }
    }
}

/// What the server finally answered after redirects were followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status_code: u16,
    pub final_url: String,
}

/// Transport-level failure: no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("request timed out ({0})")]
    Timeout(String),

    #[error("connection failed ({0})")]
    Connect(String),

    #[error("too many redirects ({0})")]
    Redirect(String),

    #[error("{0}")]
    Request(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        let description = describe(&e);
        if e.is_timeout() {
            ProbeError::Timeout(description)
        } else if e.is_connect() {
            ProbeError::Connect(description)
        } else if e.is_redirect() {
            ProbeError::Redirect(description)
        } else {
            ProbeError::Request(description)
        }
    }
}

// reqwest's Display stops at the outermost error; the cause (DNS, TLS,
// refused) lives further down the source chain.
fn describe(e: &reqwest::Error) -> String {
    let mut description = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}

#[async_trait]
pub trait Prober: Send + Sync {
    /// Issue one request, following redirects. HTTP error statuses are
    /// returned as responses, never as errors.
    async fn probe(&self, method: ProbeMethod, url: &str) -> Result<ProbeResponse, ProbeError>;
}

/// [`Prober`] backed by a shared `reqwest` client.
pub struct ReqwestProber {
    client: reqwest::Client,
}

impl ReqwestProber {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProbeError::from)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for ReqwestProber {
    async fn probe(&self, method: ProbeMethod, url: &str) -> Result<ProbeResponse, ProbeError> {
        let request = match method {
            ProbeMethod::Head => self.client.head(url),
            ProbeMethod::Get => self.client.get(url),
        };

        let response = request.send().await?;
        let probed = ProbeResponse {
            status_code: response.status().as_u16(),
            final_url: response.url().to_string(),
        };

        debug!(%method, url, status = probed.status_code, final_url = %probed.final_url, "Probe answered");
        Ok(probed)
    }
}

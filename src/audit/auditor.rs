//! HEAD-then-GET URL health check.

use tracing::debug;

use super::prober::{ProbeMethod, Prober};
use crate::models::{ProbeOutcome, UrlCheckOutcome};

/// Resolves the live status of URLs.
///
/// HEAD is tried first. Only a transport failure (timeout, DNS, refused
/// connection, TLS, malformed response) triggers the single GET retry; an
/// HTTP error status such as 404 is a final answer.
pub struct UrlAuditor<P> {
    prober: P,
}

impl<P: Prober> UrlAuditor<P> {
    pub fn new(prober: P) -> Self {
        Self { prober }
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.prober.probe(ProbeMethod::Head, url).await {
            Ok(response) => {
                return ProbeOutcome::Success {
                    status_code: response.status_code,
                    final_url: response.final_url,
                }
            }
            Err(e) => debug!(url, error = %e, "HEAD failed, retrying with GET"),
        }

        match self.prober.probe(ProbeMethod::Get, url).await {
            Ok(response) => ProbeOutcome::Success {
                status_code: response.status_code,
                final_url: response.final_url,
            },
            Err(e) => {
                debug!(url, error = %e, "GET fallback failed");
                ProbeOutcome::TransportFailure {
                    description: e.to_string(),
                }
            }
        }
    }

    pub async fn check(&self, url: &str) -> UrlCheckOutcome {
        UrlCheckOutcome::from_probe(url, self.probe(url).await)
    }
}

//! Fetch → audit → report-row assembly.

use std::path::Path;
use tracing::{debug, info};

use crate::audit::{Prober, StatusClass, UrlAuditor};
use crate::models::{ReportRow, SearchRequest};
use crate::report;
use crate::search::{ResultFetcher, SearchBackend, StopReason};
use crate::types::AuditResult;

/// Per-class counts over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub audited: usize,
    /// Results without a link; these get no row and no position
    pub skipped: usize,
    pub healthy: usize,
    pub redirected: usize,
    pub client_errors: usize,
    pub server_errors: usize,
    pub unreachable: usize,
    pub other: usize,
}

impl AuditSummary {
    fn record(&mut self, class: StatusClass) {
        self.audited += 1;
        match class {
            StatusClass::Healthy => self.healthy += 1,
            StatusClass::Redirected => self.redirected += 1,
            StatusClass::ClientError => self.client_errors += 1,
            StatusClass::ServerError => self.server_errors += 1,
            StatusClass::Unreachable => self.unreachable += 1,
            StatusClass::Other => self.other += 1,
        }
    }

    /// Rows needing attention: anything that is not a plain healthy page.
    pub fn problems(&self) -> usize {
        self.audited - self.healthy
    }
}

#[derive(Debug, Clone)]
pub struct AuditRun {
    /// Rows in discovery order, positions 1..=rows.len()
    pub rows: Vec<ReportRow>,
    pub summary: AuditSummary,
    pub pages_requested: u32,
    pub stop_reason: StopReason,
}

pub struct Orchestrator<B, P> {
    fetcher: ResultFetcher<B>,
    auditor: UrlAuditor<P>,
}

impl<B: SearchBackend, P: Prober> Orchestrator<B, P> {
    pub fn new(fetcher: ResultFetcher<B>, auditor: UrlAuditor<P>) -> Self {
        Self { fetcher, auditor }
    }

    /// Audit every result of `request`, one page and one URL at a time.
    ///
    /// Each page is audited before the next one is requested. Positions
    /// count emitted rows only and are never reset between pages.
    pub async fn run(&self, request: &SearchRequest) -> AuditRun {
        let mut cursor = self.fetcher.pages(request);
        let mut rows = Vec::new();
        let mut summary = AuditSummary::default();
        let mut position: u32 = 0;

        while let Some(items) = cursor.next_page().await {
            for item in items {
                let Some(link) = item.auditable_link().map(str::to_string) else {
                    debug!(title = ?item.title, "Skipping result without a link");
                    summary.skipped += 1;
                    continue;
                };

                let outcome = self.auditor.check(&link).await;
                position += 1;

                let class = StatusClass::classify(outcome.status_code, &link, &outcome.final_url);
                summary.record(class);
                info!(
                    position,
                    url = %link,
                    http_code = ?outcome.status_code,
                    status = %outcome.status_text,
                    final_url = %outcome.final_url,
                    %class,
                    "Checked URL"
                );

                rows.push(ReportRow::new(position, item, link, outcome));
            }
        }

        let pages_requested = cursor.pages_requested();
        let stop_reason = cursor
            .stop_reason()
            .cloned()
            .unwrap_or(StopReason::Exhausted);

        AuditRun {
            rows,
            summary,
            pages_requested,
            stop_reason,
        }
    }

    /// Run the audit and write the report to `output`.
    ///
    /// A search that stops early still writes whatever was collected; only a
    /// failed write is an error.
    pub async fn run_to_csv(&self, request: &SearchRequest, output: &Path) -> AuditResult<AuditRun> {
        let audit = self.run(request).await;
        report::write_report(output, &audit.rows).await?;
        Ok(audit)
    }
}

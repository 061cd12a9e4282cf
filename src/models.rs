use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::audit::status;

/// Number of organic results requested per search page.
pub const PAGE_SIZE: u32 = 10;

/// Upper bound on pages per run; keeps result offsets well inside `u32`.
pub const MAX_PAGES: u32 = 1000;

/// One organic result from the search API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultItem {
    /// Title of the result
    pub title: Option<String>,
    /// URL of the result; results without one are never audited
    pub link: Option<String>,
    /// The URL as Google displays it (breadcrumb form)
    pub displayed_link: Option<String>,
    /// Snippet/description
    pub snippet: Option<String>,
}

impl SearchResultItem {
    /// Build an item from one entry of an `organic_results` array.
    ///
    /// Fields with an unexpected JSON type or an empty string are treated as
    /// absent, so they survive a CSV round-trip unchanged.
    pub fn from_json(result: &Value) -> Self {
        let text = |key: &str| {
            result
                .get(key)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            title: text("title"),
            link: text("link"),
            displayed_link: text("displayed_link"),
            snippet: text("snippet"),
        }
    }

    /// The link to audit, if the item has a non-empty one.
    pub fn auditable_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|link| !link.trim().is_empty())
    }
}

/// Result of one probe sequence against a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered; any status code counts, including 4xx and 5xx.
    Success { status_code: u16, final_url: String },
    /// No HTTP response could be obtained.
    TransportFailure { description: String },
}

/// Live status of one audited URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCheckOutcome {
    /// `None` when the URL could not be reached at all
    pub status_code: Option<u16>,
    pub status_text: String,
    /// URL after redirects, or the original URL when unreachable
    pub final_url: String,
}

impl UrlCheckOutcome {
    pub fn from_probe(url: &str, outcome: ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Success {
                status_code,
                final_url,
            } => Self {
                status_code: Some(status_code),
                status_text: status::label(status_code).to_string(),
                final_url,
            },
            ProbeOutcome::TransportFailure { description } => Self {
                status_code: None,
                status_text: format!("Error: {description}"),
                final_url: url.to_string(),
            },
        }
    }
}

/// One line of the output report. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub position: u32,
    pub title: Option<String>,
    pub link: String,
    pub final_url: String,
    pub http_code: Option<u16>,
    pub status: String,
    pub displayed_link: Option<String>,
    pub snippet: Option<String>,
}

impl ReportRow {
    pub fn new(position: u32, item: SearchResultItem, link: String, outcome: UrlCheckOutcome) -> Self {
        Self {
            position,
            title: item.title,
            link,
            final_url: outcome.final_url,
            http_code: outcome.status_code,
            status: outcome.status_text,
            displayed_link: item.displayed_link,
            snippet: item.snippet,
        }
    }
}

/// An immutable description of which search results to audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub location: String,
    /// Number of pages to fetch, at least 1
    pub pages: u32,
    /// Send `filter=0`, turning off Google's folding of similar results
    pub disable_dedup: bool,
}

impl SearchRequest {
    /// Offset of the first result on the given 0-based page.
    pub fn start_offset(page_index: u32) -> u32 {
        page_index.saturating_mul(PAGE_SIZE)
    }

    /// Query parameters for one page. The API key is supplied by the backend.
    pub fn page_params(&self, page_index: u32) -> HashMap<String, String> {
        let mut params = HashMap::<String, String>::new();
        params.insert("engine".to_string(), "google".to_string());
        params.insert("q".to_string(), self.query.clone());
        params.insert("location".to_string(), self.location.clone());
        params.insert("hl".to_string(), "en".to_string());
        params.insert("gl".to_string(), "us".to_string());
        params.insert("google_domain".to_string(), "google.com".to_string());
        params.insert("num".to_string(), PAGE_SIZE.to_string());
        params.insert("start".to_string(), Self::start_offset(page_index).to_string());
        if self.disable_dedup {
            params.insert("filter".to_string(), "0".to_string());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(disable_dedup: bool) -> SearchRequest {
        SearchRequest {
            query: "site:example.com".to_string(),
            location: "United States".to_string(),
            pages: 3,
            disable_dedup,
        }
    }

    #[test]
    fn test_page_params_offsets() {
        let req = request(false);
        for page_index in 0..5 {
            let params = req.page_params(page_index);
            assert_eq!(params["start"], (page_index * 10).to_string());
            assert_eq!(params["num"], "10");
        }
    }

    #[test]
    fn test_page_params_fixed_fields() {
        let params = request(false).page_params(0);
        assert_eq!(params["engine"], "google");
        assert_eq!(params["q"], "site:example.com");
        assert_eq!(params["location"], "United States");
        assert_eq!(params["hl"], "en");
        assert_eq!(params["gl"], "us");
        assert_eq!(params["google_domain"], "google.com");
        assert!(!params.contains_key("filter"));
        assert!(!params.contains_key("api_key"));
    }

    #[test]
    fn test_page_params_dedup_filter() {
        let params = request(true).page_params(1);
        assert_eq!(params["filter"], "0");
    }

    #[test]
    fn test_item_from_json_tolerates_missing_and_mistyped_fields() {
        let item = SearchResultItem::from_json(&json!({
            "position": 1,
            "title": "Home",
            "link": "https://example.com/",
            "snippet": 42
        }));
        assert_eq!(item.title.as_deref(), Some("Home"));
        assert_eq!(item.auditable_link(), Some("https://example.com/"));
        assert_eq!(item.displayed_link, None);
        assert_eq!(item.snippet, None);
    }

    #[test]
    fn test_start_offset_of_last_allowed_page() {
        assert_eq!(SearchRequest::start_offset(MAX_PAGES - 1), 9990);
        assert_eq!(SearchRequest::start_offset(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_item_from_json_treats_empty_strings_as_absent() {
        let item = SearchResultItem::from_json(&json!({
            "title": "",
            "link": "https://example.com/a",
            "displayed_link": "",
            "snippet": ""
        }));
        assert_eq!(item.title, None);
        assert_eq!(item.displayed_link, None);
        assert_eq!(item.snippet, None);
        assert_eq!(item.auditable_link(), Some("https://example.com/a"));
    }

    #[test]
    fn test_row_from_item_with_empty_fields_survives_csv() {
        let item = SearchResultItem::from_json(&json!({
            "title": "",
            "link": "https://example.com/a",
            "snippet": ""
        }));
        let link = item.auditable_link().unwrap().to_string();
        let outcome = UrlCheckOutcome::from_probe(
            &link,
            ProbeOutcome::Success {
                status_code: 200,
                final_url: link.clone(),
            },
        );
        let rows = vec![ReportRow::new(1, item, link, outcome)];

        let data = crate::report::render_csv(&rows).unwrap();
        let parsed = crate::report::read_rows(data.as_slice()).unwrap();

        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_empty_link_is_not_auditable() {
        let item = SearchResultItem {
            link: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(item.auditable_link(), None);
        assert_eq!(SearchResultItem::default().auditable_link(), None);
    }

    #[test]
    fn test_outcome_from_failure_keeps_original_url() {
        let outcome = UrlCheckOutcome::from_probe(
            "https://example.com/a",
            ProbeOutcome::TransportFailure {
                description: "connection refused".to_string(),
            },
        );
        assert_eq!(outcome.status_code, None);
        assert_eq!(outcome.status_text, "Error: connection refused");
        assert_eq!(outcome.final_url, "https://example.com/a");
    }

    #[test]
    fn test_outcome_from_success_uses_status_table() {
        let outcome = UrlCheckOutcome::from_probe(
            "http://example.com/old",
            ProbeOutcome::Success {
                status_code: 418,
                final_url: "https://example.com/new".to_string(),
            },
        );
        assert_eq!(outcome.status_code, Some(418));
        assert_eq!(outcome.status_text, "Unknown");
        assert_eq!(outcome.final_url, "https://example.com/new");
    }
}

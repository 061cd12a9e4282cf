//! HTTP status labels and health classification.

use reqwest::Url;

/// Label used for any status code missing from the table.
pub const UNKNOWN_STATUS: &str = "Unknown";

const STATUS_MEANINGS: &[(u16, &str)] = &[
    (200, "OK"),
    (201, "Created"),
    (202, "Accepted"),
    (204, "No Content"),
    (301, "Moved Permanently"),
    (302, "Temporary Redirect"),
    (303, "See Other"),
    (307, "Temporary Redirect (Preserve Method)"),
    (308, "Permanent Redirect (Preserve Method)"),
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (410, "Gone"),
    (429, "Too Many Requests"),
    (500, "Server Error"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
];

/// Human-readable label for a status code.
pub fn label(code: u16) -> &'static str {
    STATUS_MEANINGS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, meaning)| *meaning)
        .unwrap_or(UNKNOWN_STATUS)
}

/// Coarse health bucket of an audited URL, used for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// 2xx at the indexed URL itself
    Healthy,
    /// 2xx reached through a redirect, or a 3xx that was not followed further
    Redirected,
    ClientError,
    ServerError,
    /// No HTTP response at all
    Unreachable,
    Other,
}

impl StatusClass {
    pub fn classify(status_code: Option<u16>, link: &str, final_url: &str) -> Self {
        let Some(code) = status_code else {
            return StatusClass::Unreachable;
        };

        match code {
            200..=299 if same_url(link, final_url) => StatusClass::Healthy,
            200..=399 => StatusClass::Redirected,
            400..=499 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Other,
        }
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusClass::Healthy => write!(f, "healthy"),
            StatusClass::Redirected => write!(f, "redirected"),
            StatusClass::ClientError => write!(f, "client error"),
            StatusClass::ServerError => write!(f, "server error"),
            StatusClass::Unreachable => write!(f, "unreachable"),
            StatusClass::Other => write!(f, "other"),
        }
    }
}

// Compares parsed URLs so "https://a.com" and "https://a.com/" are the same page.
fn same_url(link: &str, final_url: &str) -> bool {
    match (Url::parse(link), Url::parse(final_url)) {
        (Ok(a), Ok(b)) => a == b,
        _ => link == final_url,
    }
}

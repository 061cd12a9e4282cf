//! Paginated retrieval of organic results.

use serde_json::Value;
use tracing::{info, warn};

use super::serpapi::SearchBackend;
use crate::models::{SearchRequest, SearchResultItem};

/// Why pagination ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Every requested page was fetched
    Exhausted,
    /// A page came back with no organic results
    EmptyPage { page: u32 },
    /// The API answered with an `error` field
    ApiError(String),
    /// The API could not be reached
    TransportError(String),
}

/// Everything a full fetch produced.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub items: Vec<SearchResultItem>,
    pub pages_requested: u32,
    pub stop_reason: StopReason,
}

pub struct ResultFetcher<B> {
    backend: B,
}

impl<B: SearchBackend> ResultFetcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Start walking the pages of `request`. Nothing is fetched until the
    /// first call to [`PageCursor::next_page`].
    pub fn pages<'a>(&'a self, request: &'a SearchRequest) -> PageCursor<'a, B> {
        PageCursor {
            backend: &self.backend,
            request,
            next_index: 0,
            pages_requested: 0,
            stop_reason: None,
        }
    }

    /// Fetch every page up front.
    pub async fn fetch(&self, request: &SearchRequest) -> FetchReport {
        let mut cursor = self.pages(request);
        let mut items = Vec::new();
        while let Some(page) = cursor.next_page().await {
            items.extend(page);
        }

        FetchReport {
            items,
            pages_requested: cursor.pages_requested(),
            stop_reason: cursor.into_stop_reason(),
        }
    }
}

/// A single forward pass over the result pages of one request.
///
/// Pages are requested strictly one after another because whether page N+1
/// is requested depends on what page N contained. Once the cursor stops it
/// stays stopped.
pub struct PageCursor<'a, B> {
    backend: &'a B,
    request: &'a SearchRequest,
    next_index: u32,
    pages_requested: u32,
    stop_reason: Option<StopReason>,
}

impl<B: SearchBackend> PageCursor<'_, B> {
    /// Fetch the next page. Returns `None` once pagination has ended; items
    /// already handed out are unaffected by a later failure.
    pub async fn next_page(&mut self) -> Option<Vec<SearchResultItem>> {
        if self.stop_reason.is_some() {
            return None;
        }
        if self.next_index >= self.request.pages {
            self.stop_reason = Some(StopReason::Exhausted);
            return None;
        }

        let page_index = self.next_index;
        self.next_index += 1;
        self.pages_requested += 1;

        let params = self.request.page_params(page_index);
        info!(
            page = page_index + 1,
            start = SearchRequest::start_offset(page_index),
            "Fetching Google page"
        );

        let data = match self.backend.search(&params).await {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Error connecting to SerpAPI");
                self.stop_reason = Some(StopReason::TransportError(e.to_string()));
                return None;
            }
        };

        if let Some(error) = data.get("error") {
            let message = error
                .as_str()
                .map(String::from)
                .unwrap_or_else(|| error.to_string());
            warn!(error = %message, "API Error");
            self.stop_reason = Some(StopReason::ApiError(message));
            return None;
        }

        let items = organic_results(&data);
        if items.is_empty() {
            info!(page = page_index + 1, "No additional results found");
            self.stop_reason = Some(StopReason::EmptyPage {
                page: page_index + 1,
            });
            return None;
        }

        info!(page = page_index + 1, count = items.len(), "Page fetched");
        Some(items)
    }

    pub fn pages_requested(&self) -> u32 {
        self.pages_requested
    }

    /// `None` while more pages may follow.
    pub fn stop_reason(&self) -> Option<&StopReason> {
        self.stop_reason.as_ref()
    }

    fn into_stop_reason(self) -> StopReason {
        self.stop_reason.unwrap_or(StopReason::Exhausted)
    }
}

fn organic_results(data: &Value) -> Vec<SearchResultItem> {
    data.get("organic_results")
        .and_then(|results| results.as_array())
        .map(|results| results.iter().map(SearchResultItem::from_json).collect())
        .unwrap_or_default()
}

//! Search Module
//!
//! Retrieves Google organic results page by page:
//! - [`SerpApiBackend`] performs one SerpAPI request per page
//! - [`ResultFetcher`] drives pagination and decides when to stop
//!
//! Uses SerpAPI as the backend for the Google engine.

pub mod fetcher;
pub mod serpapi;

pub use fetcher::{FetchReport, PageCursor, ResultFetcher, StopReason};
pub use serpapi::{SearchBackend, SearchError, SerpApiBackend};

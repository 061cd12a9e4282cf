use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_LOCATION, DEFAULT_OUTPUT, DEFAULT_PAGES, DEFAULT_TIMEOUT_SECS};
use crate::models::MAX_PAGES;

#[derive(Debug, Parser)]
#[command(
    name = "serp-audit",
    version,
    about = "Check the live HTTP status of a site's Google results and save them to CSV"
)]
pub struct Cli {
    /// Google query, e.g. "site:example.com"
    #[arg(long)]
    pub query: String,

    /// Region the search is run from
    #[arg(long, default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// How many result pages to fetch (10 results per page, at most 1000)
    #[arg(long, default_value_t = DEFAULT_PAGES, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGES as i64))]
    pub pages: u32,

    /// CSV file to write; overwritten on every run
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Seconds to wait for each URL probe
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Send filter=0 so Google does not fold similar results together
    #[arg(long)]
    pub no_dedup: bool,

    /// Read SERPAPI_API_KEY from this file instead of the default .env locations
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["serp-audit", "--query", "site:example.com"]).unwrap();
        assert_eq!(cli.location, "United States");
        assert_eq!(cli.pages, 10);
        assert_eq!(cli.output, PathBuf::from("serp_results.csv"));
        assert_eq!(cli.timeout, 10);
        assert!(!cli.no_dedup);
        assert!(cli.env_file.is_none());
    }

    #[test]
    fn test_query_is_required() {
        assert!(Cli::try_parse_from(["serp-audit"]).is_err());
    }

    #[test]
    fn test_pages_must_be_positive() {
        assert!(Cli::try_parse_from(["serp-audit", "--query", "q", "--pages", "0"]).is_err());
        assert!(Cli::try_parse_from(["serp-audit", "--query", "q", "--pages", "-2"]).is_err());

        let cli = Cli::try_parse_from(["serp-audit", "--query", "q", "--pages", "3"]).unwrap();
        assert_eq!(cli.pages, 3);
    }

    #[test]
    fn test_pages_upper_bound() {
        let cli = Cli::try_parse_from(["serp-audit", "--query", "q", "--pages", "1000"]).unwrap();
        assert_eq!(cli.pages, MAX_PAGES);

        assert!(Cli::try_parse_from(["serp-audit", "--query", "q", "--pages", "1001"]).is_err());
        assert!(Cli::try_parse_from(["serp-audit", "--query", "q", "--pages", "4294967295"]).is_err());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "serp-audit",
            "--query",
            "site:example.org",
            "--location",
            "Austin, Texas, United States",
            "--output",
            "out/report.csv",
            "--timeout",
            "30",
            "--no-dedup",
            "--env-file",
            "secrets.env",
        ])
        .unwrap();
        assert_eq!(cli.location, "Austin, Texas, United States");
        assert_eq!(cli.output, PathBuf::from("out/report.csv"));
        assert_eq!(cli.timeout, 30);
        assert!(cli.no_dedup);
        assert_eq!(cli.env_file, Some(PathBuf::from("secrets.env")));
    }
}

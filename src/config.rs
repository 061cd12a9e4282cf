use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::models::{SearchRequest, MAX_PAGES};
use crate::types::{AuditError, AuditResult};

/// Environment variable holding the SerpAPI key.
pub const API_KEY_VAR: &str = "SERPAPI_API_KEY";

pub const DEFAULT_LOCATION: &str = "United States";
pub const DEFAULT_PAGES: u32 = 10;
pub const DEFAULT_OUTPUT: &str = "serp_results.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENV_FILE_NAME: &str = ".env";

/// Configuration for one audit run, built once at startup.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub search: SearchConfig,
    pub probe: ProbeConfig,
    pub output: PathBuf,
}

#[derive(Clone)]
pub struct SearchConfig {
    pub serpapi_key: String,
    pub request: SearchRequest,
}

// Keeps the key out of logs.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("serpapi_key", &"<redacted>")
            .field("request", &self.request)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub timeout: Duration,
}

impl AuditConfig {
    /// Combine parsed flags with the credential found in the environment.
    ///
    /// `searched` lists the `.env` locations that were tried; it only feeds
    /// the error message when the key is missing.
    pub fn from_cli(cli: &Cli, api_key: Option<String>, searched: &[PathBuf]) -> AuditResult<Self> {
        let serpapi_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AuditError::MissingCredential {
                searched: searched.to_vec(),
            })?;

        let query = cli.query.trim();
        if query.is_empty() {
            return Err(AuditError::InvalidConfig("--query must not be empty".to_string()));
        }
        if cli.pages == 0 || cli.pages > MAX_PAGES {
            return Err(AuditError::InvalidConfig(format!(
                "--pages must be between 1 and {MAX_PAGES}"
            )));
        }
        if cli.timeout == 0 {
            return Err(AuditError::InvalidConfig("--timeout must be at least 1 second".to_string()));
        }

        Ok(Self {
            search: SearchConfig {
                serpapi_key,
                request: SearchRequest {
                    query: query.to_string(),
                    location: cli.location.clone(),
                    pages: cli.pages,
                    disable_dedup: cli.no_dedup,
                },
            },
            probe: ProbeConfig {
                timeout: Duration::from_secs(cli.timeout),
            },
            output: cli.output.clone(),
        })
    }
}

/// Result of looking for a `.env` file.
#[derive(Debug, Clone, Default)]
pub struct EnvFileLookup {
    pub loaded: Option<PathBuf>,
    pub searched: Vec<PathBuf>,
}

/// Load a `.env` file into the process environment.
///
/// With an explicit path only that file is tried. Otherwise the file next to
/// the executable wins over one in the working directory. Variables already
/// set in the environment are never overwritten.
pub fn load_env_file(explicit: Option<&Path>) -> EnvFileLookup {
    let candidates = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => default_env_candidates(),
    };

    let mut lookup = EnvFileLookup::default();
    for path in candidates {
        debug!(path = %path.display(), "Looking for .env");
        lookup.searched.push(path.clone());
        if !path.is_file() {
            continue;
        }
        match dotenvy::from_path(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Loaded .env");
                lookup.loaded = Some(path);
                break;
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to read .env"),
        }
    }
    lookup
}

fn default_env_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        candidates.push(dir.join(ENV_FILE_NAME));
    }
    if let Ok(cwd) = env::current_dir() {
        let local = cwd.join(ENV_FILE_NAME);
        if !candidates.contains(&local) {
            candidates.push(local);
        }
    }
    candidates
}

/// The SerpAPI key from the process environment, if set and non-blank.
pub fn api_key_from_env() -> Option<String> {
    env::var(API_KEY_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

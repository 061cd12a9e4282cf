// Application error type and result alias

use std::path::PathBuf;

use crate::config::API_KEY_VAR;
use crate::search::SearchError;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("SERPAPI_API_KEY not loaded")]
    MissingCredential { searched: Vec<PathBuf> },

    #[error("Cannot write to {}: {source}", .path.display())]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Startup capability check failed: {0}")]
    Capability(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Error saving CSV to {}: {reason}", .path.display())]
    Report { path: PathBuf, reason: String },

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl AuditError {
    /// The action the user should take to get past this error, if there is one.
    pub fn remediation(&self) -> Option<String> {
        match self {
            AuditError::MissingCredential { searched } => {
                let mut text = String::new();
                if searched.is_empty() {
                    text.push_str("No .env file was found.\n");
                } else {
                    text.push_str("Looked for a .env file at:\n");
                    for path in searched {
                        text.push_str(&format!("    {}\n", path.display()));
                    }
                }
                text.push_str("\nPlease check:\n");
                text.push_str("1. Did you save the file?\n");
                text.push_str(&format!("2. Does it contain: {API_KEY_VAR}=your_key_here\n"));
                text.push_str(&format!(
                    "\nAlternatively export {API_KEY_VAR} in your shell or pass --env-file <path>."
                ));
                Some(text)
            }
            AuditError::OutputNotWritable { .. } => {
                Some("Close the file (Excel/other) and try again.".to_string())
            }
            AuditError::Capability(_) => Some(
                "The HTTP client could not be initialised. Check that the system TLS \
                 libraries are installed and rebuild serp-audit."
                    .to_string(),
            ),
            AuditError::InvalidConfig(_) => Some("Run with --help to see valid options.".to_string()),
            AuditError::Report { .. } => Some(
                "Check free disk space and permissions, then run the audit again.".to_string(),
            ),
            AuditError::Search(_) => None,
        }
    }
}

pub type AuditResult<T> = std::result::Result<T, AuditError>;

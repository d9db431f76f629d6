//! CLI error types and exit codes

use ccroster_client::ClientError;
use thiserror::Error;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: General error
/// - 2: Session missing or rejected
/// - 3: Network error
/// - 4: Validation error
/// - 5: Server error
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No session configured. Run 'ccroster session set' first.")]
    NoSession,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("{failed} of {attempted} membership changes failed: {message}")]
    Reconciliation {
        failed: usize,
        attempted: usize,
        status: Option<u16>,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(String),
}

fn exit_code_for_status(status: u16) -> i32 {
    if status >= 500 {
        5
    } else if status == 401 || status == 403 {
        2
    } else {
        4
    }
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoSession => 2,
            CliError::Network(_) => 3,
            CliError::Validation(_) => 4,
            CliError::Server(_) => 5,
            CliError::Api { status, .. } => exit_code_for_status(*status),
            CliError::Reconciliation { status, .. } => status.map_or(1, exit_code_for_status),
            CliError::Config(_) | CliError::Io(_) => 1,
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::NoSession => Some("Run 'ccroster session set --user-id <id> --header cookie:<value>'."),
            CliError::Api { status: 401 | 403, .. } => {
                Some("Your session headers may have expired. Run 'ccroster session set' again.")
            }
            CliError::Api { status: 429, .. } | CliError::Reconciliation { status: Some(429), .. } => {
                Some("The service is rate limiting. Wait a moment and run 'ccroster assign' again.")
            }
            CliError::Reconciliation { .. } => {
                Some("Run 'ccroster status' to see which changes are still pending.")
            }
            CliError::Network(_) => Some("Check your network connection and the configured api_url."),
            _ => None,
        }
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::RemoteCallFailed { status, .. } => CliError::Api {
                status,
                message: e.to_string(),
            },
            ClientError::Network(msg) => CliError::Network(msg),
            ClientError::Parse(msg) => CliError::Server(format!("Unexpected response: {msg}")),
            ClientError::InvalidConfig(msg) => CliError::Config(msg),
            ClientError::TaskFailed(msg) => CliError::Server(msg),
            ClientError::ApplyFailed {
                failed,
                attempted,
                ref source,
            } => CliError::Reconciliation {
                failed,
                attempted,
                status: source.status(),
                message: source.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Config(format!("JSON error: {}", e))
    }
}

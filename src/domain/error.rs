use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A trade feed or price API answered with a non-success status or could
    /// not be reached. Fatal for the whole run.
    #[error("Upstream unavailable: {source_name}{}: {detail}", http_suffix(.status))]
    UpstreamUnavailable {
        source_name: String,
        status: Option<u16>,
        detail: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No trades could be backtested ({attempted} purchases attempted)")]
    NoBacktestResults { attempted: usize },
}

fn http_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

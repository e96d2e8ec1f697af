/// Error types for Cloud Scout

use crate::logs::LogsAction;
use crate::query::Provider;
use thiserror::Error;

/// Errors raised by the recent-selection store and its storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid selection item: {0}")]
    InvalidItem(String),

    #[error("Storage is unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Failed to read key '{key}': {reason}")]
    StorageRead { key: String, reason: String },

    #[error("Failed to write key '{key}': {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while turning provider responses into catalogs
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse {source_name} response: {error}")]
    Parse {
        source_name: &'static str,
        error: serde_json::Error,
    },
}

/// Errors raised by the question analysis flow
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Please enter a question")]
    EmptyQuestion,

    #[error("{}", not_ready_message(.0))]
    NotReady(Provider),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by the CloudWatch Logs flows
#[derive(Debug, Error)]
pub enum LogsError {
    #[error("{}", access_denied_message(.0))]
    AccessDenied(LogsAction),

    #[error("No logs to summarize. Please fetch logs first.")]
    NothingToSummarize,

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

const LOGS_PERMISSIONS: &str = "Required permissions include:\n\
     - logs:GetLogEvents\n\
     - logs:FilterLogEvents\n\
     - logs:DescribeLogGroups\n\
     \n\
     Please contact your AWS administrator if you need access to logs.";

fn access_denied_message(action: &LogsAction) -> String {
    let lead = match action {
        LogsAction::Show => "CloudWatch Logs access requires additional permissions beyond read-only access.",
        LogsAction::Summarize => "Log summarization requires CloudWatch Logs access permissions.",
    };
    format!("{}\n{}", lead, LOGS_PERMISSIONS)
}

fn not_ready_message(provider: &Provider) -> &'static str {
    match provider {
        Provider::Aws => "Please connect to AWS and select a region first",
        Provider::Gcp => "Please connect to GCP and select a project first",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_item_message() {
        let err = StoreError::InvalidItem("id must not be empty".to_string());
        assert!(err.to_string().contains("Invalid selection item"));
        assert!(err.to_string().contains("id must not be empty"));
    }

    #[test]
    fn test_storage_write_message() {
        let err = StoreError::StorageWrite {
            key: "recentAwsRegions".to_string(),
            reason: "QuotaExceededError".to_string(),
        };
        assert!(err.to_string().contains("recentAwsRegions"));
        assert!(err.to_string().contains("QuotaExceededError"));
    }

    #[test]
    fn test_serialization_from_serde() {
        let serde_err = serde_json::from_str::<Vec<String>>("{not json").unwrap_err();
        let err: StoreError = serde_err.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_not_ready_messages() {
        assert_eq!(
            QueryError::NotReady(Provider::Aws).to_string(),
            "Please connect to AWS and select a region first"
        );
        assert_eq!(
            QueryError::NotReady(Provider::Gcp).to_string(),
            "Please connect to GCP and select a project first"
        );
    }

    #[test]
    fn test_logs_access_denied_messages() {
        let show = LogsError::AccessDenied(LogsAction::Show).to_string();
        assert!(show.starts_with("CloudWatch Logs access requires additional permissions"));
        assert!(show.contains("\n- logs:DescribeLogGroups\n"));
        assert!(show.ends_with("\n\nPlease contact your AWS administrator if you need access to logs."));

        let summarize = LogsError::AccessDenied(LogsAction::Summarize).to_string();
        assert!(summarize.starts_with("Log summarization requires CloudWatch Logs access permissions.\n"));
    }
}

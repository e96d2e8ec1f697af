/// CloudWatch Logs: access check, log group listing and the summary gate
use crate::error::LogsError;
use serde::Deserialize;
use std::fmt::Write;

/// AWS error codes that mean the credentials may not read logs
pub const ACCESS_DENIED_CODES: &[&str] = &["AccessDeniedException", "UnauthorizedOperation"];

pub const SUMMARY_MESSAGE: &str = "Log summarization feature is available with proper CloudWatch Logs access. You can analyze:\n\
     - Error patterns\n\
     - Common events\n\
     - Performance metrics\n\
     - System health indicators";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogsAction {
    Show,
    Summarize,
}

/// Decide whether a failed one-item DescribeLogGroups call blocks `action`.
///
/// Only a permission denial blocks; any other failure is left for the real
/// call to report.
pub fn check_access(action: LogsAction, error_code: Option<&str>) -> Result<(), LogsError> {
    match error_code {
        Some(code) if ACCESS_DENIED_CODES.contains(&code) => Err(LogsError::AccessDenied(action)),
        _ => Ok(()),
    }
}

// CloudWatch Logs DescribeLogGroups

#[derive(Debug, Deserialize)]
pub struct DescribeLogGroupsResponse {
    #[serde(rename = "logGroups", default)]
    pub log_groups: Vec<LogGroup>,
}

#[derive(Debug, Deserialize)]
pub struct LogGroup {
    #[serde(rename = "logGroupName")]
    pub name: String,
    /// Milliseconds since the epoch
    #[serde(rename = "creationTime")]
    pub creation_time: Option<f64>,
    #[serde(rename = "storedBytes", default)]
    pub stored_bytes: u64,
}

/// Render the log group listing; `created` formats a creation timestamp
pub fn format_log_groups<F>(json: &str, created: F) -> Result<String, LogsError>
where
    F: Fn(f64) -> String,
{
    let response: DescribeLogGroupsResponse = serde_json::from_str(json)?;

    let mut out = String::from("CloudWatch Log Groups:\n\n");
    for group in &response.log_groups {
        let when = group
            .creation_time
            .map(&created)
            .unwrap_or_else(|| "unknown".to_string());
        let _ = writeln!(out, "{}", group.name);
        let _ = writeln!(out, "- Created: {}", when);
        let _ = writeln!(out, "- Stored Bytes: {}\n", group.stored_bytes);
    }

    Ok(out)
}

/// Summaries need a fetched listing to work from
pub fn summarize(logs_text: &str) -> Result<&'static str, LogsError> {
    if logs_text.trim().is_empty() {
        return Err(LogsError::NothingToSummarize);
    }
    Ok(SUMMARY_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_timestamp(ms: f64) -> String {
        format!("t={}", ms)
    }

    #[test]
    fn test_check_access() {
        assert!(check_access(LogsAction::Show, None).is_ok());
        assert!(check_access(LogsAction::Show, Some("ThrottlingException")).is_ok());
        assert!(matches!(
            check_access(LogsAction::Show, Some("AccessDeniedException")),
            Err(LogsError::AccessDenied(LogsAction::Show))
        ));
        assert!(matches!(
            check_access(LogsAction::Summarize, Some("UnauthorizedOperation")),
            Err(LogsError::AccessDenied(LogsAction::Summarize))
        ));
    }

    #[test]
    fn test_log_groups_report() {
        let json = r#"{"logGroups": [
            {"logGroupName": "/aws/lambda/orders", "creationTime": 1700000000000, "storedBytes": 2048},
            {"logGroupName": "/ecs/api"}
        ]}"#;

        let report = format_log_groups(json, create_test_timestamp).unwrap();

        assert!(report.starts_with("CloudWatch Log Groups:\n\n"));
        assert!(report.contains("/aws/lambda/orders\n- Created: t=1700000000000\n- Stored Bytes: 2048\n\n"));
        assert!(report.contains("/ecs/api\n- Created: unknown\n- Stored Bytes: 0\n\n"));
    }

    #[test]
    fn test_log_groups_report_empty() {
        let report = format_log_groups("{}", create_test_timestamp).unwrap();
        assert_eq!(report, "CloudWatch Log Groups:\n\n");

        assert!(format_log_groups("not json", create_test_timestamp).is_err());
    }

    #[test]
    fn test_summarize_needs_logs() {
        assert!(matches!(summarize(""), Err(LogsError::NothingToSummarize)));
        assert!(matches!(summarize("  \n"), Err(LogsError::NothingToSummarize)));
        assert_eq!(summarize("CloudWatch Log Groups:\n\n").unwrap(), SUMMARY_MESSAGE);
    }
}

/// Cost and resource figures for the dashboard cards
use serde::Deserialize;
use std::future::Future;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CostAndUsageResponse {
    #[serde(default)]
    results_by_time: Vec<ResultByTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultByTime {
    total: Option<Totals>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Totals {
    unblended_cost: Option<Metric>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Metric {
    amount: Option<String>,
}

impl ResultByTime {
    fn amount(&self) -> f64 {
        self.total
            .as_ref()
            .and_then(|t| t.unblended_cost.as_ref())
            .and_then(|m| m.amount.as_deref())
            .and_then(|a| a.parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

/// Month-to-date cost and its change against last month
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostSummary {
    pub current_cost: f64,
    /// Percent change from last month; 0 when last month had no cost
    pub cost_change: f64,
}

impl CostSummary {
    /// Read a monthly `GetCostAndUsage` response: last month first, then this month
    pub fn from_cost_and_usage(json: &str) -> Result<Self, serde_json::Error> {
        let response: CostAndUsageResponse = serde_json::from_str(json)?;
        let amount_at = |i: usize| response.results_by_time.get(i).map(ResultByTime::amount).unwrap_or(0.0);

        let last_month = amount_at(0);
        let current = amount_at(1);
        let cost_change = if last_month != 0.0 {
            (current - last_month) / last_month * 100.0
        } else {
            0.0
        };

        Ok(CostSummary {
            current_cost: current,
            cost_change,
        })
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub cost: CostSummary,
    pub active_resources: usize,
}

/// Await both figure lookups together
pub async fn gather<C, R>(cost: C, active_resources: R) -> DashboardData
where
    C: Future<Output = CostSummary>,
    R: Future<Output = usize>,
{
    let (cost, active_resources) = futures::join!(cost, active_resources);
    DashboardData { cost, active_resources }
}

/// Number of running instances in a `DescribeInstances` response
pub fn running_instance_count(json: &str) -> Result<usize, serde_json::Error> {
    let response: crate::query::DescribeInstancesResponse = serde_json::from_str(json)?;
    Ok(response.running().len())
}

/// Query period covering last month through today, as `YYYY-MM-DD` strings.
///
/// `month` is 1-based.
pub fn cost_period(year: i32, month: u32, day: u32) -> (String, String) {
    let (start_year, start_month) = if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };

    (
        format!("{:04}-{:02}-01", start_year, start_month),
        format!("{:04}-{:02}-{:02}", year, month, day),
    )
}

pub fn format_cost(amount: f64, decimals: usize) -> String {
    format!("${:.*}", decimals, amount)
}

/// Arrow and magnitude, e.g. "↑ 12.5%"
pub fn format_trend(change: f64) -> String {
    let arrow = if change >= 0.0 { "↑" } else { "↓" };
    format!("{} {:.1}%", arrow, change.abs())
}

/// Rising cost is shown in red, falling in green
pub fn trend_class(change: f64) -> &'static str {
    if change >= 0.0 {
        "metric-trend trend-up"
    } else {
        "metric-trend trend-down"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_summary() {
        let json = r#"{"ResultsByTime": [
            {"Total": {"UnblendedCost": {"Amount": "200.00", "Unit": "USD"}}},
            {"Total": {"UnblendedCost": {"Amount": "250.50", "Unit": "USD"}}}
        ]}"#;

        let summary = CostSummary::from_cost_and_usage(json).unwrap();

        assert_eq!(summary.current_cost, 250.5);
        assert!((summary.cost_change - 25.25).abs() < 1e-9);
    }

    #[test]
    fn test_cost_summary_no_previous_cost() {
        let json = r#"{"ResultsByTime": [
            {"Total": {}},
            {"Total": {"UnblendedCost": {"Amount": "10"}}}
        ]}"#;

        let summary = CostSummary::from_cost_and_usage(json).unwrap();

        assert_eq!(summary.current_cost, 10.0);
        assert_eq!(summary.cost_change, 0.0);
    }

    #[test]
    fn test_cost_summary_missing_months() {
        let summary = CostSummary::from_cost_and_usage(r#"{"ResultsByTime": []}"#).unwrap();
        assert_eq!(summary, CostSummary::default());
    }

    #[test]
    fn test_cost_period() {
        assert_eq!(
            cost_period(2026, 10, 16),
            ("2026-09-01".to_string(), "2026-10-16".to_string())
        );
        assert_eq!(
            cost_period(2026, 1, 5),
            ("2025-12-01".to_string(), "2026-01-05".to_string())
        );
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(250.5, 2), "$250.50");
        assert_eq!(format_cost(0.0, 2), "$0.00");
        assert_eq!(format_cost(3.14159, 0), "$3");
    }

    #[test]
    fn test_format_trend() {
        assert_eq!(format_trend(12.46), "↑ 12.5%");
        assert_eq!(format_trend(-3.21), "↓ 3.2%");
        assert_eq!(format_trend(0.0), "↑ 0.0%");
        assert_eq!(trend_class(-1.0), "metric-trend trend-down");
    }

    #[test]
    fn test_running_instance_count() {
        let json = r#"{"Reservations": [{"Instances": [
            {"InstanceId": "i-1", "InstanceType": "t3.micro", "State": {"Name": "running"}},
            {"InstanceId": "i-2", "InstanceType": "t3.micro", "State": {"Name": "pending"}}
        ]}]}"#;

        assert_eq!(running_instance_count(json).unwrap(), 1);
    }

    #[test]
    fn test_gather_runs_lookups_together() {
        let (ready_tx, ready_rx) = futures::channel::oneshot::channel::<()>();

        // The cost lookup only finishes once the resource lookup has started
        let cost = async move {
            let _ = ready_rx.await;
            CostSummary {
                current_cost: 12.5,
                cost_change: 0.0,
            }
        };
        let resources = async move {
            let _ = ready_tx.send(());
            3
        };

        let data = futures::executor::block_on(gather(cost, resources));

        assert_eq!(data.active_resources, 3);
        assert_eq!(data.cost.current_cost, 12.5);
    }
}

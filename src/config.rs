/// Application configuration for Cloud Scout
///
/// The built-in defaults are what ships in the extension. An override can be
/// supplied as JSON (for example from a dev build) and only needs to name the
/// fields it changes.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub mode: Mode,
    pub debug: bool,
    pub version: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            mode: Mode::Development,
            debug: true,
            version: "1.0.0".to_string(),
        }
    }
}

/// Settings handed to the provider SDK, which owns retries and timeouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub timeout_ms: u32,
    pub max_retries: u32,
    pub retry_delay_ms: u32,
}

impl Default for RequestConfig {
    fn default() -> Self {
        RequestConfig {
            timeout_ms: 15_000,
            max_retries: 3,
            retry_delay_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub code: String,
    pub name: String,
    pub active: bool,
    pub time_zone: String,
    #[serde(default)]
    pub zones: Vec<String>,
}

impl RegionInfo {
    fn new(code: &str, name: &str, time_zone: &str, zones: &[&str]) -> Self {
        RegionInfo {
            code: code.to_string(),
            name: name.to_string(),
            active: true,
            time_zone: time_zone.to_string(),
            zones: zones.iter().map(|z| z.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub default_region: String,
    pub preferred_regions: Vec<String>,
    pub regions: Vec<RegionInfo>,
    pub request: RequestConfig,
    pub ec2_api_version: String,
    pub cost_explorer_api_version: String,
    pub cloudwatch_api_version: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        AwsConfig {
            default_region: "us-east-1".to_string(),
            preferred_regions: vec![
                "us-east-1".to_string(),
                "us-west-2".to_string(),
                "eu-west-1".to_string(),
            ],
            regions: vec![
                RegionInfo::new("us-east-1", "US East (N. Virginia)", "America/New_York", &[]),
                RegionInfo::new("us-west-1", "US West (N. California)", "America/Los_Angeles", &[]),
                RegionInfo::new("us-west-2", "US West (Oregon)", "America/Los_Angeles", &[]),
                RegionInfo::new("eu-west-1", "Europe (Ireland)", "Europe/Dublin", &[]),
            ],
            request: RequestConfig::default(),
            ec2_api_version: "2016-11-15".to_string(),
            cost_explorer_api_version: "2017-10-25".to_string(),
            cloudwatch_api_version: "2014-03-28".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcpConfig {
    pub default_region: String,
    pub preferred_regions: Vec<String>,
    pub regions: Vec<RegionInfo>,
}

impl Default for GcpConfig {
    fn default() -> Self {
        GcpConfig {
            default_region: "us-central1".to_string(),
            preferred_regions: vec![
                "us-central1".to_string(),
                "us-east1".to_string(),
                "europe-west1".to_string(),
            ],
            regions: vec![
                RegionInfo::new(
                    "us-central1",
                    "Iowa",
                    "America/Chicago",
                    &["us-central1-a", "us-central1-b", "us-central1-c"],
                ),
                RegionInfo::new(
                    "us-east1",
                    "South Carolina",
                    "America/New_York",
                    &["us-east1-b", "us-east1-c", "us-east1-d"],
                ),
                RegionInfo::new(
                    "europe-west1",
                    "Belgium",
                    "Europe/Brussels",
                    &["europe-west1-b", "europe-west1-c", "europe-west1-d"],
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub refresh_interval_ms: u32,
    pub cost_decimal_places: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            refresh_interval_ms: 300_000,
            cost_decimal_places: 2,
        }
    }
}

/// Known user-facing failures, by code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    AwsConnection,
    AwsAuthentication,
    CostData,
    GcpConnection,
    GcpAuthentication,
    GcpProject,
}

const ERROR_CATALOG: &[(ErrorCode, &str, &str)] = &[
    (ErrorCode::AwsConnection, "AWS_CONN_ERR", "Failed to connect to AWS services"),
    (ErrorCode::AwsAuthentication, "AWS_AUTH_ERR", "AWS authentication failed"),
    (ErrorCode::CostData, "COST_DATA_ERR", "Failed to fetch cost data"),
    (ErrorCode::GcpConnection, "GCP_CONN_ERR", "Failed to connect to Google Cloud services"),
    (ErrorCode::GcpAuthentication, "GCP_AUTH_ERR", "Google Cloud authentication failed"),
    (ErrorCode::GcpProject, "GCP_PROJECT_ERR", "Failed to load Google Cloud projects"),
];

const UNKNOWN_ERROR: &str = "An unknown error occurred";

impl ErrorCode {
    pub fn code(self) -> &'static str {
        ERROR_CATALOG
            .iter()
            .find(|(c, _, _)| *c == self)
            .map(|(_, code, _)| *code)
            .unwrap_or("UNKNOWN")
    }

    pub fn message(self) -> &'static str {
        error_message(self.code())
    }
}

/// Look up the message for an error code string
pub fn error_message(code: &str) -> &'static str {
    ERROR_CATALOG
        .iter()
        .find(|(_, c, _)| *c == code)
        .map(|(_, _, message)| *message)
        .unwrap_or(UNKNOWN_ERROR)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub env: EnvConfig,
    pub aws: AwsConfig,
    pub gcp: GcpConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_dev(&self) -> bool {
        self.env.mode == Mode::Development
    }

    pub fn log_level(&self) -> log::Level {
        if self.is_dev() && self.env.debug {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }

    pub fn aws_region_name(&self, code: &str) -> String {
        region_name(&self.aws.regions, code)
    }

    pub fn gcp_region_name(&self, code: &str) -> String {
        region_name(&self.gcp.regions, code)
    }

    pub fn is_preferred_region(&self, code: &str) -> bool {
        self.aws.preferred_regions.iter().any(|r| r == code)
    }

    pub fn is_preferred_gcp_region(&self, code: &str) -> bool {
        self.gcp.preferred_regions.iter().any(|r| r == code)
    }
}

fn region_name(regions: &[RegionInfo], code: &str) -> String {
    regions
        .iter()
        .find(|r| r.code == code)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| code.to_string())
}

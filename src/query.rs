/// Question analysis: keyword dispatch and report formatting
///
/// A question is never interpreted beyond substring matching. Each trigger
/// maps a set of keywords to one provider capability; every capability whose
/// keywords appear in the question is queried, in table order.
use crate::error::QueryError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Aws,
    Gcp,
}

impl Provider {
    pub fn report_header(self) -> &'static str {
        match self {
            Provider::Aws => "Analysis Results:\n",
            Provider::Gcp => "GCP Analysis Results:\n",
        }
    }
}

/// A canned query the popup knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Ec2Instances,
    S3Buckets,
    RdsDatabases,
    ComputeInstances,
}

pub struct Trigger {
    pub provider: Provider,
    pub keywords: &'static [&'static str],
    pub capability: Capability,
}

pub const TRIGGERS: &[Trigger] = &[
    Trigger {
        provider: Provider::Aws,
        keywords: &["ec2", "instances"],
        capability: Capability::Ec2Instances,
    },
    Trigger {
        provider: Provider::Aws,
        keywords: &["s3", "bucket"],
        capability: Capability::S3Buckets,
    },
    Trigger {
        provider: Provider::Aws,
        keywords: &["rds", "database"],
        capability: Capability::RdsDatabases,
    },
    Trigger {
        provider: Provider::Gcp,
        keywords: &["instance", "vm"],
        capability: Capability::ComputeInstances,
    },
];

/// Trim the question and reject it when blank
pub fn validate_question(question: &str) -> Result<&str, QueryError> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(QueryError::EmptyQuestion);
    }
    Ok(trimmed)
}

/// Capabilities whose keywords occur in `question`, in table order
pub fn match_capabilities(provider: Provider, question: &str) -> Vec<Capability> {
    let question = question.to_lowercase();
    let mut matched: Vec<Capability> = Vec::new();

    for trigger in TRIGGERS.iter().filter(|t| t.provider == provider) {
        if trigger.keywords.iter().any(|k| question.contains(k)) && !matched.contains(&trigger.capability) {
            matched.push(trigger.capability);
        }
    }

    matched
}

// EC2 DescribeInstances

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeInstancesResponse {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reservation {
    #[serde(default)]
    pub instances: Vec<Ec2Instance>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ec2Instance {
    pub instance_id: String,
    pub instance_type: String,
    pub state: InstanceState,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceState {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Ec2Instance {
    pub fn display_name(&self) -> &str {
        self.tags
            .iter()
            .find(|t| t.key == "Name")
            .map(|t| t.value.as_str())
            .unwrap_or("Unnamed")
    }

    pub fn is_running(&self) -> bool {
        self.state.name == "running"
    }
}

impl DescribeInstancesResponse {
    pub fn running(&self) -> Vec<&Ec2Instance> {
        self.reservations
            .iter()
            .flat_map(|r| r.instances.iter())
            .filter(|i| i.is_running())
            .collect()
    }
}

pub fn format_ec2_report(json: &str) -> Result<String, QueryError> {
    let response: DescribeInstancesResponse = serde_json::from_str(json)?;
    let running = response.running();

    let mut types: Vec<&str> = Vec::new();
    for instance in &running {
        if !types.contains(&instance.instance_type.as_str()) {
            types.push(&instance.instance_type);
        }
    }

    let mut out = String::from("\nEC2 Instances:\n");
    let _ = writeln!(out, "- Total instances: {}", running.len());
    let _ = writeln!(out, "- Instance types in use: {}", types.join(", "));

    if !running.is_empty() {
        out.push_str("\nInstance Details:\n");
        for instance in &running {
            let _ = writeln!(
                out,
                "- {} ({}): {}, {}",
                instance.display_name(),
                instance.instance_id,
                instance.instance_type,
                instance.state.name
            );
        }
    }

    Ok(out)
}

// S3 ListBuckets / GetBucketLocation

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListBucketsResponse {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bucket {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BucketLocation {
    location_constraint: Option<String>,
}

pub const UNKNOWN_REGION: &str = "unknown";

/// Region of a bucket from its `GetBucketLocation` response.
///
/// An empty constraint means the bucket lives in us-east-1.
pub fn bucket_region(location_json: &str) -> String {
    match serde_json::from_str::<BucketLocation>(location_json) {
        Ok(BucketLocation {
            location_constraint: Some(region),
        }) if !region.is_empty() => region,
        Ok(_) => "us-east-1".to_string(),
        Err(_) => UNKNOWN_REGION.to_string(),
    }
}

pub fn parse_buckets(json: &str) -> Result<Vec<Bucket>, QueryError> {
    let response: ListBucketsResponse = serde_json::from_str(json)?;
    Ok(response.buckets)
}

/// Format buckets paired with their regions
pub fn format_s3_report(buckets: &[(String, String)]) -> String {
    let mut out = String::from("\nS3 Buckets:\n");
    let _ = writeln!(out, "- Total buckets: {}", buckets.len());

    if !buckets.is_empty() {
        out.push_str("- Bucket names:\n");
        for (name, region) in buckets {
            let _ = writeln!(out, "  • {} ({})", name, region);
        }
    }

    out
}

// RDS DescribeDBInstances

#[derive(Debug, Deserialize)]
pub struct DescribeDbInstancesResponse {
    #[serde(rename = "DBInstances", default)]
    pub db_instances: Vec<DbInstance>,
}

#[derive(Debug, Deserialize)]
pub struct DbInstance {
    #[serde(rename = "DBInstanceIdentifier")]
    pub identifier: String,
    #[serde(rename = "Engine")]
    pub engine: String,
    #[serde(rename = "EngineVersion")]
    pub engine_version: String,
    #[serde(rename = "DBInstanceStatus")]
    pub status: String,
}

pub fn format_rds_report(json: &str) -> Result<String, QueryError> {
    let response: DescribeDbInstancesResponse = serde_json::from_str(json)?;

    let mut out = String::from("\nRDS Databases:\n");
    let _ = writeln!(out, "- Total databases: {}", response.db_instances.len());

    if !response.db_instances.is_empty() {
        out.push_str("\nDatabase Details:\n");
        for db in &response.db_instances {
            let _ = writeln!(
                out,
                "- {}: {} {}, Status: {}",
                db.identifier, db.engine, db.engine_version, db.status
            );
        }
    }

    Ok(out)
}

// Compute Engine aggregated instances

const COMPUTE_BASE: &str = "https://compute.googleapis.com/compute/v1/projects/";

pub const PROJECTS_URL: &str = "https://cloudresourcemanager.googleapis.com/v1/projects";

#[derive(Debug, Deserialize)]
pub struct AggregatedInstancesResponse {
    #[serde(default)]
    pub items: BTreeMap<String, InstancesScopedList>,
}

#[derive(Debug, Deserialize)]
pub struct InstancesScopedList {
    #[serde(default)]
    pub instances: Vec<ComputeInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeInstance {
    pub name: String,
    pub machine_type: String,
    pub status: String,
}

impl ComputeInstance {
    /// Machine type without its resource path
    pub fn machine_type_name(&self) -> &str {
        self.machine_type.rsplit('/').next().unwrap_or(&self.machine_type)
    }
}

/// Aggregated instances endpoint for `project`
pub fn compute_instances_url(project: &str) -> Result<Url, QueryError> {
    let mut url = Url::parse(COMPUTE_BASE)?;
    url.path_segments_mut()
        .map_err(|_| QueryError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend([project, "aggregated", "instances"]);
    Ok(url)
}

pub fn format_compute_report(json: &str) -> Result<String, QueryError> {
    let response: AggregatedInstancesResponse = serde_json::from_str(json)?;
    let instances: Vec<&ComputeInstance> = response
        .items
        .values()
        .flat_map(|scoped| scoped.instances.iter())
        .collect();

    let mut out = String::from("\nCompute Engine Instances:\n");
    let _ = writeln!(out, "- Total instances: {}", instances.len());

    if !instances.is_empty() {
        out.push_str("\nInstance Details:\n");
        for instance in &instances {
            let _ = writeln!(
                out,
                "- {}: {}, {}",
                instance.name,
                instance.machine_type_name(),
                instance.status
            );
        }
    }

    Ok(out)
}

/// Selection categories and the catalogs that feed them

use crate::config::AppConfig;
use crate::error::CatalogError;
use crate::selection::SelectionItem;
use serde::Deserialize;

/// A kind of selection with its own recent list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    AwsRegions,
    GcpProjects,
}

impl Category {
    /// Key the recent list is persisted under
    pub fn storage_key(self) -> &'static str {
        match self {
            Category::AwsRegions => "recentAwsRegions",
            Category::GcpProjects => "recentGcpProjects",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Category::AwsRegions => "Select a region",
            Category::GcpProjects => "Select a project",
        }
    }

    pub fn others_label(self) -> &'static str {
        match self {
            Category::AwsRegions => "All Regions",
            Category::GcpProjects => "All Projects",
        }
    }

    pub fn loading_message(self) -> &'static str {
        match self {
            Category::AwsRegions => "Loading regions...",
            Category::GcpProjects => "Loading projects...",
        }
    }

    pub fn element_id(self) -> &'static str {
        match self {
            Category::AwsRegions => "region",
            Category::GcpProjects => "project",
        }
    }
}

pub const RECENT_LABEL: &str = "Recently Used";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeRegionsResponse {
    #[serde(default)]
    regions: Vec<AwsRegion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwsRegion {
    region_name: String,
}

/// Build the region catalog from an EC2 `DescribeRegions` response
pub fn aws_regions_from_response(config: &AppConfig, json: &str) -> Result<Vec<SelectionItem>, CatalogError> {
    let response: DescribeRegionsResponse = serde_json::from_str(json).map_err(|error| CatalogError::Parse {
        source_name: "DescribeRegions",
        error,
    })?;

    Ok(response
        .regions
        .into_iter()
        .map(|r| {
            let name = config.aws_region_name(&r.region_name);
            SelectionItem::new(r.region_name, name)
        })
        .collect())
}

/// Static region catalog used when the regions API is unreachable
pub fn aws_fallback_regions(config: &AppConfig) -> Vec<SelectionItem> {
    config
        .aws
        .regions
        .iter()
        .filter(|r| r.active)
        .map(|r| SelectionItem::new(r.code.clone(), r.name.clone()))
        .collect()
}

#[derive(Debug, Deserialize)]
struct ProjectsResponse {
    #[serde(default)]
    projects: Vec<GcpProject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GcpProject {
    project_id: String,
    name: Option<String>,
}

/// Build the project catalog from a Resource Manager `projects.list` response
pub fn gcp_projects_from_response(json: &str) -> Result<Vec<SelectionItem>, CatalogError> {
    let response: ProjectsResponse = serde_json::from_str(json).map_err(|error| CatalogError::Parse {
        source_name: "projects.list",
        error,
    })?;

    Ok(response
        .projects
        .into_iter()
        .map(|p| SelectionItem::with_fallback_name(p.project_id, p.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        assert_eq!(Category::AwsRegions.storage_key(), "recentAwsRegions");
        assert_eq!(Category::GcpProjects.storage_key(), "recentGcpProjects");
    }

    #[test]
    fn test_aws_regions_named_from_table() {
        let config = AppConfig::default();
        let json = r#"{"Regions": [
            {"RegionName": "us-east-1", "Endpoint": "ec2.us-east-1.amazonaws.com"},
            {"RegionName": "ap-south-1", "Endpoint": "ec2.ap-south-1.amazonaws.com"}
        ]}"#;

        let regions = aws_regions_from_response(&config, json).unwrap();

        assert_eq!(
            regions,
            vec![
                SelectionItem::new("us-east-1", "US East (N. Virginia)"),
                SelectionItem::new("ap-south-1", "ap-south-1"),
            ]
        );
    }

    #[test]
    fn test_aws_regions_malformed() {
        let config = AppConfig::default();

        let result = aws_regions_from_response(&config, "<html>");

        assert!(matches!(result, Err(CatalogError::Parse { source_name: "DescribeRegions", .. })));
    }

    #[test]
    fn test_aws_fallback_skips_inactive() {
        let mut config = AppConfig::default();
        config.aws.regions[1].active = false;

        let regions = aws_fallback_regions(&config);

        let ids: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["us-east-1", "us-west-2", "eu-west-1"]);
    }

    #[test]
    fn test_gcp_projects_name_falls_back_to_id() {
        let json = r#"{"projects": [
            {"projectId": "billing-prod", "name": "Billing Production"},
            {"projectId": "sandbox-42"}
        ]}"#;

        let projects = gcp_projects_from_response(json).unwrap();

        assert_eq!(
            projects,
            vec![
                SelectionItem::new("billing-prod", "Billing Production"),
                SelectionItem::new("sandbox-42", "sandbox-42"),
            ]
        );
    }

    #[test]
    fn test_gcp_projects_missing_list() {
        let projects = gcp_projects_from_response("{}").unwrap();
        assert!(projects.is_empty());
    }
}

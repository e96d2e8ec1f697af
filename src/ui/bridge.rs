/// Bindings to the provider SDK calls in popup.js
///
/// Responses come back as JSON text and are parsed on the Rust side.
use crate::config::RequestConfig;
use std::fmt;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn awsConfigure(region: &str, request: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn awsVerifyCredentials(access_key: &str, secret_key: &str, region: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn awsSetRegion(region: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn awsDescribeRegions(region: &str, api_version: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn awsDescribeInstances(api_version: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn awsListBuckets() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn awsGetBucketLocation(bucket: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn awsDescribeDbInstances() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn awsGetCostAndUsage(start: &str, end: &str, api_version: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn awsDescribeLogGroups(api_version: &str, limit: Option<u32>) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn gcpAuthToken() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn fetchJson(url: &str, token: &str) -> Result<JsValue, JsValue>;
}

fn js_error(e: JsValue) -> String {
    e.dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e))
}

/// A rejected SDK call that kept the AWS error code
#[derive(Debug, Clone)]
pub struct SdkError {
    pub code: Option<String>,
    pub message: String,
}

impl fmt::Display for SdkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn sdk_error(e: JsValue) -> SdkError {
    let code = js_sys::Reflect::get(&e, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_string());
    SdkError {
        code,
        message: js_error(e),
    }
}

fn into_text(value: JsValue) -> Result<String, String> {
    value
        .as_string()
        .ok_or_else(|| "Expected a JSON string from the SDK bridge".to_string())
}

pub fn aws_configure(region: &str, request: &RequestConfig) -> Result<(), String> {
    let request_js = serde_wasm_bindgen::to_value(request)
        .map_err(|e| format!("Failed to serialize request config: {:?}", e))?;
    awsConfigure(region, request_js).map_err(js_error)
}

pub async fn aws_verify_credentials(access_key: &str, secret_key: &str, region: &str) -> Result<(), String> {
    awsVerifyCredentials(access_key, secret_key, region)
        .await
        .map(|_| ())
        .map_err(js_error)
}

pub fn aws_set_region(region: &str) -> Result<(), String> {
    awsSetRegion(region).map_err(js_error)
}

pub async fn aws_describe_regions(region: &str, api_version: &str) -> Result<String, String> {
    awsDescribeRegions(region, api_version)
        .await
        .map_err(js_error)
        .and_then(into_text)
}

pub async fn aws_describe_instances(api_version: &str) -> Result<String, String> {
    awsDescribeInstances(api_version)
        .await
        .map_err(js_error)
        .and_then(into_text)
}

pub async fn aws_list_buckets() -> Result<String, String> {
    awsListBuckets().await.map_err(js_error).and_then(into_text)
}

pub async fn aws_get_bucket_location(bucket: &str) -> Result<String, String> {
    awsGetBucketLocation(bucket)
        .await
        .map_err(js_error)
        .and_then(into_text)
}

pub async fn aws_describe_db_instances() -> Result<String, String> {
    awsDescribeDbInstances().await.map_err(js_error).and_then(into_text)
}

pub async fn aws_get_cost_and_usage(start: &str, end: &str, api_version: &str) -> Result<String, String> {
    awsGetCostAndUsage(start, end, api_version)
        .await
        .map_err(js_error)
        .and_then(into_text)
}

/// List log groups, at most `limit` of them when given
pub async fn aws_describe_log_groups(api_version: &str, limit: Option<u32>) -> Result<String, SdkError> {
    let value = awsDescribeLogGroups(api_version, limit).await.map_err(sdk_error)?;
    into_text(value).map_err(|message| SdkError { code: None, message })
}

pub async fn gcp_auth_token() -> Result<String, String> {
    gcpAuthToken().await.map_err(js_error).and_then(into_text)
}

pub async fn fetch_json(url: &str, token: &str) -> Result<String, String> {
    fetchJson(url, token).await.map_err(js_error).and_then(into_text)
}

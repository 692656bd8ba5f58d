use serde::{Deserialize, Serialize};

/// Answer of `GET serverInfo`, used as connection probe
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraServerInfo {
    pub base_url: Option<String>,
    pub version: Option<String>,
    pub deployment_type: Option<String>,
    pub server_title: Option<String>,
}

/// Error body: `{"errorMessages":["..."], "errors":{"field":"..."}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraErrorBody {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: serde_json::Map<String, serde_json::Value>,
}

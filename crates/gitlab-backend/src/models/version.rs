use serde::{Deserialize, Serialize};

/// Answer of `GET /version`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitLabVersion {
    pub version: String,
    pub revision: Option<String>,
}

use serde::Deserialize;
use validator::Validate;

/// Query of the pod and deployment list endpoints. Missing or zero
/// `limit`/`page` returns every match; a missing namespace lists all of them.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter_name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub limit: i64,
    pub cluster: String,
}

/// Addresses one pod; used as query string and as delete body.
#[derive(Debug, Deserialize)]
pub struct PodRef {
    pub pod_name: String,
    pub namespace: String,
    pub cluster: String,
}

#[derive(Debug, Deserialize)]
pub struct PodLogQuery {
    pub container_name: String,
    pub pod_name: String,
    pub namespace: String,
    pub cluster: String,
}

#[derive(Debug, Deserialize)]
pub struct DeploymentRef {
    pub deployment_name: String,
    pub namespace: String,
    pub cluster: String,
}

/// Full JSON manifest replacing the stored object.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub namespace: String,
    pub content: String,
    pub cluster: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ScaleRequest {
    pub deployment_name: String,
    #[validate(range(min = 0, message = "scale_num must not be negative"))]
    pub scale_num: i32,
    pub namespace: String,
    pub cluster: String,
}

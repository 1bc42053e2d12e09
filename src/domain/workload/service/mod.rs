//! Pod and Deployment operations over the cluster registry

pub mod deployment_service;
pub mod pod_service;
pub mod quantity;

use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::workload::error::{GatewayError, GatewayResult};

/// One page of a list operation. `total` counts every record that matched
/// the filter, not just the ones on this page.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Decodes a full JSON manifest and returns it with the name it addresses.
pub(crate) fn parse_manifest<K>(kind: &'static str, content: &str) -> GatewayResult<(String, K)>
where
    K: Resource + DeserializeOwned,
{
    let object: K = serde_json::from_str(content).map_err(|e| GatewayError::DeserializationFailed {
        kind,
        reason: e.to_string(),
    })?;

    let name = object
        .meta()
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or(GatewayError::DeserializationFailed {
            kind,
            reason: "metadata.name is missing".to_string(),
        })?;

    Ok((name, object))
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Everything needed to assemble a new Deployment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeployCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "namespace must not be empty"))]
    pub namespace: String,

    #[validate(range(min = 0, message = "replicas must not be negative"))]
    pub replicas: i32,

    #[validate(length(min = 1, message = "image must not be empty"))]
    pub image: String,

    /// Applied to the object, the pod template and the selector alike
    #[serde(default)]
    pub label: BTreeMap<String, String>,

    /// Kubernetes quantity, used as both request and limit
    pub cpu: String,
    pub memory: String,

    /// Probe target port; the declared container port stays 80
    #[serde(default)]
    pub container_port: i32,

    #[serde(default)]
    pub health_check: bool,
    #[serde(default)]
    pub health_path: String,

    #[validate(length(min = 1, message = "cluster must not be empty"))]
    pub cluster: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> serde_json::Value {
        serde_json::json!({
            "name": "web",
            "namespace": "default",
            "replicas": 2,
            "image": "nginx:1.27",
            "label": { "app": "web" },
            "cpu": "500m",
            "memory": "256Mi",
            "container_port": 8080,
            "health_check": true,
            "health_path": "/healthz",
            "cluster": "TST-1"
        })
    }

    #[test]
    fn deserializes_wire_names() {
        let dc: DeployCreate = serde_json::from_value(payload()).unwrap();

        assert_eq!(dc.label.get("app").map(String::as_str), Some("web"));
        assert_eq!(dc.container_port, 8080);
        assert!(dc.health_check);
        assert!(dc.validate().is_ok());
    }

    #[test]
    fn rejects_negative_replicas_and_blank_image() {
        let mut value = payload();
        value["replicas"] = serde_json::json!(-1);
        value["image"] = serde_json::json!("");
        let dc: DeployCreate = serde_json::from_value(value).unwrap();

        let errors = dc.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("replicas"));
        assert!(fields.contains_key("image"));
    }
}

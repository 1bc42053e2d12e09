//! Fixtures shared by the unit tests: kube clients aimed at a local mock
//! API server, throwaway kubeconfig files and typed resource objects.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use httpmock::MockServer;
use kube::{Client, Config};
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::core::client::cluster_registry::ClusterRegistry;
use crate::core::client::kube_resources::{
    Container, Deployment, DeploymentSpec, LabelSelector, ObjectMeta, Pod, PodSpec,
    PodTemplateSpec, Time,
};

pub const TEST_CLUSTER: &str = "TST-1";
pub const TEST_NAMESPACE: &str = "default";

pub fn fake_client(url: &str) -> Client {
    let config = Config::new(url.parse().expect("valid test url"));
    Client::try_from(config).expect("test client")
}

/// Registry with a single cluster, `TST-1`, served by `server`.
pub fn registry_for(server: &MockServer) -> Arc<ClusterRegistry> {
    Arc::new(ClusterRegistry::from_clients([(
        TEST_CLUSTER,
        fake_client(&server.base_url()),
    )]))
}

/// Client for a server that answers every request with a 200 whose body
/// stops short of its declared length, so reading it fails midway.
pub async fn truncated_body_client() -> Client {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 1024\r\n\r\npartial line\n",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });
    fake_client(&format!("http://{addr}"))
}

pub fn write_kubeconfig(server_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp kubeconfig");
    write!(
        file,
        r#"apiVersion: v1
kind: Config
clusters:
  - name: test
    cluster:
      server: {server_url}
contexts:
  - name: test
    context:
      cluster: test
      user: test
      namespace: default
current-context: test
users:
  - name: test
    user: {{}}
"#
    )
    .expect("write kubeconfig");
    file
}

fn meta(name: &str, created: DateTime<Utc>) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(TEST_NAMESPACE.to_string()),
        creation_timestamp: Some(Time(created)),
        ..ObjectMeta::default()
    }
}

pub fn container(name: &str, image: &str) -> Container {
    Container {
        name: name.to_string(),
        image: Some(image.to_string()),
        ..Container::default()
    }
}

pub fn test_pod(name: &str, created: DateTime<Utc>) -> Pod {
    Pod {
        metadata: meta(name, created),
        spec: Some(PodSpec {
            containers: vec![container("app", "nginx:1.27")],
            ..PodSpec::default()
        }),
        ..Pod::default()
    }
}

pub fn test_deployment(name: &str, created: DateTime<Utc>) -> Deployment {
    let labels = BTreeMap::from([("app".to_string(), name.to_string())]);
    Deployment {
        metadata: meta(name, created),
        spec: Some(DeploymentSpec {
            replicas: Some(1),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..LabelSelector::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..ObjectMeta::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![container(name, "nginx:1.27")],
                    ..PodSpec::default()
                }),
            },
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    }
}

/// Body the API server returns for a successful delete.
pub fn status_success() -> serde_json::Value {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Success",
        "code": 200
    })
}

/// Body the API server returns for a missing object.
pub fn status_not_found(kind: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": format!("{kind} \"{name}\" not found"),
        "reason": "NotFound",
        "details": { "name": name, "kind": kind },
        "code": 404
    })
}

fn list_of<T: serde::Serialize>(kind: &str, api_version: &str, items: &[T]) -> serde_json::Value {
    serde_json::json!({
        "kind": kind,
        "apiVersion": api_version,
        "metadata": { "resourceVersion": "1" },
        "items": items,
    })
}

pub fn pod_list(items: &[Pod]) -> serde_json::Value {
    list_of("PodList", "v1", items)
}

pub fn deployment_list(items: &[Deployment]) -> serde_json::Value {
    list_of("DeploymentList", "apps/v1", items)
}

/// Failure `Status` body as the API server sends it.
pub fn status_failure(code: u16, reason: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
}

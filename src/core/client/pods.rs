use futures::AsyncReadExt;
use kube::api::{DeleteParams, ListParams, LogParams, PostParams};
use kube::{Api, Client};
use thiserror::Error;
use tracing::debug;

use crate::core::client::kube_resources::Pod;

/// Fetch pods in a specific namespace; an empty namespace means all namespaces
pub async fn fetch_pods_by_namespace(client: Client, namespace: &str) -> kube::Result<Vec<Pod>> {
    let pods: Api<Pod> = if namespace.is_empty() {
        Api::all(client)
    } else {
        Api::namespaced(client, namespace)
    };
    let pod_list = pods.list(&ListParams::default()).await?;

    debug!("Discovered {} pod(s) in namespace '{}'", pod_list.items.len(), namespace);
    Ok(pod_list.items)
}

/// Fetch a single pod by name and namespace
pub async fn fetch_pod_by_name_and_namespace(
    client: Client,
    namespace: &str,
    pod_name: &str,
) -> kube::Result<Pod> {
    let pods: Api<Pod> = Api::namespaced(client, namespace);
    let pod = pods.get(pod_name).await?;

    debug!("Fetched pod: {}/{}", namespace, pod_name);
    Ok(pod)
}

pub async fn delete_pod(client: Client, namespace: &str, pod_name: &str) -> kube::Result<()> {
    let pods: Api<Pod> = Api::namespaced(client, namespace);
    pods.delete(pod_name, &DeleteParams::default()).await?;

    debug!("Deleted pod: {}/{}", namespace, pod_name);
    Ok(())
}

/// Full replace; whatever `pod` carries overwrites the stored object
pub async fn replace_pod(
    client: Client,
    namespace: &str,
    name: &str,
    pod: &Pod,
) -> kube::Result<Pod> {
    let pods: Api<Pod> = Api::namespaced(client, namespace);
    let replaced = pods.replace(name, &PostParams::default(), pod).await?;

    debug!("Replaced pod: {}/{}", namespace, name);
    Ok(replaced)
}

/// Failure while reading a container log.
#[derive(Debug, Error)]
pub enum LogReadError {
    /// The API server refused to open the stream.
    #[error("failed to open log stream: {0}")]
    Stream(#[source] kube::Error),
    /// The stream broke while being copied.
    #[error("failed to copy log stream: {0}")]
    Copy(#[source] std::io::Error),
}

/// Read the log of one container, limited to the last `tail_lines` lines
pub async fn read_pod_log(
    client: Client,
    namespace: &str,
    pod_name: &str,
    container: &str,
    tail_lines: i64,
) -> Result<Vec<u8>, LogReadError> {
    let pods: Api<Pod> = Api::namespaced(client, namespace);
    let lp = LogParams {
        container: Some(container.to_string()),
        tail_lines: Some(tail_lines),
        ..LogParams::default()
    };

    let logs = pods
        .log_stream(pod_name, &lp)
        .await
        .map_err(LogReadError::Stream)?;
    futures::pin_mut!(logs);

    let mut buf = Vec::new();
    logs.read_to_end(&mut buf).await.map_err(LogReadError::Copy)?;

    debug!("Read {} byte(s) of log from {}/{}:{}", buf.len(), namespace, pod_name, container);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;

    #[test]
    fn log_read_error_keeps_its_source() {
        let err = LogReadError::Copy(io::Error::new(io::ErrorKind::UnexpectedEof, "body cut short"));

        assert_eq!(err.to_string(), "failed to copy log stream: body cut short");
        assert!(err.source().is_some());
    }
}

use std::sync::Arc;

use tracing::error;

use crate::config::LOG_TAIL_LINES;
use crate::core::client::cluster_registry::ClusterRegistry;
use crate::core::client::kube_resources::Pod;
use crate::core::client::pods::{
    delete_pod, fetch_pod_by_name_and_namespace, fetch_pods_by_namespace, read_pod_log,
    replace_pod, LogReadError,
};
use crate::domain::common::model::DataSelectQuery;
use crate::domain::common::service::data_cell::PodCell;
use crate::domain::common::service::data_selector::DataSelector;
use crate::domain::workload::error::{GatewayError, GatewayResult};
use crate::domain::workload::service::{parse_manifest, ListResult};

const KIND: &str = "pod";

/// Pod operations against any registered cluster.
#[derive(Debug, Clone)]
pub struct PodService {
    registry: Arc<ClusterRegistry>,
}

impl PodService {
    pub fn new(registry: Arc<ClusterRegistry>) -> Self {
        Self { registry }
    }

    /// Pods of `namespace` whose name contains `filter_name`, newest first,
    /// paged by `limit`/`page`. `total` counts matches before paging.
    pub async fn list(
        &self,
        cluster: &str,
        filter_name: &str,
        namespace: &str,
        limit: i64,
        page: i64,
    ) -> GatewayResult<ListResult<Pod>> {
        let client = self.registry.get_client(cluster)?.client();

        let pods = fetch_pods_by_namespace(client, namespace)
            .await
            .map_err(|source| {
                error!(cluster, namespace, "Failed to list pods: {}", source);
                GatewayError::UpstreamListFailed { kind: KIND, source }
            })?;

        let cells = pods.into_iter().map(PodCell::from).collect();
        let selection =
            DataSelector::new(cells, DataSelectQuery::new(filter_name, limit, page)).select();

        Ok(ListResult {
            items: selection.items.into_iter().map(Pod::from).collect(),
            total: selection.total,
        })
    }

    /// A missing pod is reported as an ordinary upstream failure.
    pub async fn get(&self, cluster: &str, pod_name: &str, namespace: &str) -> GatewayResult<Pod> {
        let client = self.registry.get_client(cluster)?.client();

        fetch_pod_by_name_and_namespace(client, namespace, pod_name)
            .await
            .map_err(|source| {
                error!(cluster, namespace, pod_name, "Failed to get pod: {}", source);
                GatewayError::UpstreamGetFailed {
                    kind: KIND,
                    name: pod_name.to_string(),
                    source,
                }
            })
    }

    pub async fn delete(&self, cluster: &str, pod_name: &str, namespace: &str) -> GatewayResult<()> {
        let client = self.registry.get_client(cluster)?.client();

        delete_pod(client, namespace, pod_name)
            .await
            .map_err(|source| {
                error!(cluster, namespace, pod_name, "Failed to delete pod: {}", source);
                GatewayError::UpstreamDeleteFailed {
                    kind: KIND,
                    name: pod_name.to_string(),
                    source,
                }
            })
    }

    /// Replaces the stored pod with the JSON manifest in `content`.
    ///
    /// This is a blind overwrite: whatever resourceVersion the manifest
    /// carries is sent as is, and a manifest without one wins over any
    /// concurrent writer. Most pod spec fields are immutable, so the API
    /// server rejects anything beyond image and a few metadata changes.
    pub async fn update(&self, cluster: &str, namespace: &str, content: &str) -> GatewayResult<()> {
        let client = self.registry.get_client(cluster)?.client();
        let (name, pod) = parse_manifest::<Pod>(KIND, content).inspect_err(|e| {
            error!(cluster, namespace, "Rejected pod manifest: {}", e);
        })?;

        replace_pod(client, namespace, &name, &pod)
            .await
            .map(|_| ())
            .map_err(|source| {
                error!(cluster, namespace, pod_name = %name, "Failed to update pod: {}", source);
                GatewayError::UpstreamUpdateFailed {
                    kind: KIND,
                    name,
                    source,
                }
            })
    }

    /// Names of the pod's containers in spec order.
    pub async fn get_containers(
        &self,
        cluster: &str,
        pod_name: &str,
        namespace: &str,
    ) -> GatewayResult<Vec<String>> {
        let pod = self.get(cluster, pod_name, namespace).await?;

        Ok(pod
            .spec
            .map(|spec| spec.containers.into_iter().map(|c| c.name).collect())
            .unwrap_or_default())
    }

    /// Last `LOG_TAIL_LINES` lines of one container's log, read fully into memory.
    pub async fn get_log(
        &self,
        cluster: &str,
        container_name: &str,
        pod_name: &str,
        namespace: &str,
    ) -> GatewayResult<String> {
        let client = self.registry.get_client(cluster)?.client();

        let bytes = read_pod_log(client, namespace, pod_name, container_name, LOG_TAIL_LINES)
            .await
            .map_err(|e| match e {
                LogReadError::Stream(source) => {
                    error!(cluster, namespace, pod_name, container_name, "Failed to open log stream: {}", source);
                    GatewayError::UpstreamLogStreamFailed {
                        pod: pod_name.to_string(),
                        source,
                    }
                }
                LogReadError::Copy(source) => {
                    error!(cluster, namespace, pod_name, container_name, "Failed to copy pod log: {}", source);
                    GatewayError::LogCopyFailed {
                        pod: pod_name.to_string(),
                        source,
                    }
                }
            })?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

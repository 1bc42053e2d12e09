use std::path::Path;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

use crate::core::client::cluster_registry::RegistryError;

/// Creates a Kubernetes client from the kubeconfig file at `path`,
/// using that file's current context
pub async fn build_kube_client(cluster: &str, path: &Path) -> Result<Client, RegistryError> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|source| RegistryError::InvalidKubeconfig {
        cluster: cluster.to_string(),
        path: path.display().to_string(),
        source,
    })?;

    let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|source| RegistryError::InvalidKubeconfig {
            cluster: cluster.to_string(),
            path: path.display().to_string(),
            source,
        })?;

    debug!("Using API server {} for cluster '{}'", config.cluster_url, cluster);

    let client = Client::try_from(config).map_err(|source| RegistryError::ClientBuild {
        cluster: cluster.to_string(),
        source,
    })?;

    debug!("Kubernetes client for cluster '{}' initialized successfully", cluster);
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::write_kubeconfig;

    #[tokio::test]
    async fn builds_client_from_kubeconfig_file() {
        let file = write_kubeconfig("http://127.0.0.1:6443");

        let result = build_kube_client("TST-1", file.path()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn missing_kubeconfig_is_invalid() {
        let result = build_kube_client("TST-1", Path::new("/nonexistent/kubeconfig")).await;

        match result {
            Err(RegistryError::InvalidKubeconfig { cluster, .. }) => assert_eq!(cluster, "TST-1"),
            other => panic!("expected InvalidKubeconfig, got {:?}", other.map(|_| ())),
        }
    }
}

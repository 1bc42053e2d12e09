//! Cluster name -> authenticated Kubernetes client.
//!
//! The registry is built once in `main` and is read-only afterwards, so
//! concurrent requests share it through an `Arc` without locking.

use std::collections::HashMap;
use std::fmt;

use kube::config::KubeconfigError;
use kube::Client;
use thiserror::Error;
use tracing::info;

use crate::config::GatewayConfig;
use crate::core::client::kube_client::build_kube_client;
use crate::domain::workload::error::{GatewayError, GatewayResult};

/// Startup failures. Any of these aborts the process.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cluster '{cluster}': failed to load kubeconfig '{path}': {source}")]
    InvalidKubeconfig {
        cluster: String,
        path: String,
        #[source]
        source: KubeconfigError,
    },

    #[error("cluster '{cluster}': failed to create Kubernetes client: {source}")]
    ClientBuild {
        cluster: String,
        #[source]
        source: kube::Error,
    },
}

/// Connection to one cluster's API server.
#[derive(Clone)]
pub struct ClusterHandle {
    name: String,
    client: Client,
}

impl ClusterHandle {
    pub fn new(name: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clone of the underlying client; `kube::Client` clones share one connection pool.
    pub fn client(&self) -> Client {
        self.client.clone()
    }
}

impl fmt::Debug for ClusterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterHandle").field("name", &self.name).finish()
    }
}

#[derive(Debug, Default)]
pub struct ClusterRegistry {
    clusters: HashMap<String, ClusterHandle>,
}

impl ClusterRegistry {
    /// Builds one client per configured cluster. Fails on the first entry
    /// whose kubeconfig cannot be loaded; there is no partial registry.
    pub async fn init(config: &GatewayConfig) -> Result<Self, RegistryError> {
        let mut clusters = HashMap::with_capacity(config.clusters.len());

        for (name, path) in &config.clusters {
            let client = build_kube_client(name, path).await?;
            clusters.insert(name.clone(), ClusterHandle::new(name.clone(), client));
            info!("Cluster '{}': Kubernetes client created", name);
        }

        Ok(Self { clusters })
    }

    /// Registry over already constructed clients.
    pub fn from_clients<I, S>(clients: I) -> Self
    where
        I: IntoIterator<Item = (S, Client)>,
        S: Into<String>,
    {
        let clusters = clients
            .into_iter()
            .map(|(name, client)| {
                let handle = ClusterHandle::new(name, client);
                (handle.name.clone(), handle)
            })
            .collect();

        Self { clusters }
    }

    pub fn get_client(&self, cluster: &str) -> GatewayResult<&ClusterHandle> {
        self.clusters
            .get(cluster)
            .ok_or_else(|| GatewayError::ClusterNotFound(cluster.to_string()))
    }

    /// Configured cluster names, sorted.
    pub fn cluster_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.clusters.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

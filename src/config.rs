//! Process configuration, read once from the environment at startup.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Number of trailing lines requested when reading a container log.
pub const LOG_TAIL_LINES: i64 = 5000;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9090";
pub const DEFAULT_LOG_DIR: &str = "logs";

pub const ENV_LISTEN_ADDR: &str = "KUBEGATE_LISTEN_ADDR";
pub const ENV_CLUSTERS: &str = "KUBEGATE_CLUSTERS";
pub const ENV_LOG_DIR: &str = "KUBEGATE_LOG_DIR";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub listen_addr: String,
    /// Cluster name -> kubeconfig location.
    pub clusters: BTreeMap<String, PathBuf>,
    pub log_dir: PathBuf,
}

impl GatewayConfig {
    /// Reads the configuration from `KUBEGATE_*` variables.
    ///
    /// `KUBEGATE_CLUSTERS` is required and must be a JSON object such as
    /// `{"cluster-a": "config/a.yaml", "cluster-b": "config/b.yaml"}`.
    pub fn from_env() -> Result<Self> {
        let listen_addr =
            env::var(ENV_LISTEN_ADDR).unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let log_dir = env::var(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR));

        let raw = env::var(ENV_CLUSTERS)
            .with_context(|| format!("{ENV_CLUSTERS} is not set"))?;
        let clusters = parse_cluster_map(&raw)?;

        Ok(Self {
            listen_addr,
            clusters,
            log_dir,
        })
    }
}

/// Parses the cluster name -> kubeconfig location mapping.
pub fn parse_cluster_map(raw: &str) -> Result<BTreeMap<String, PathBuf>> {
    serde_json::from_str(raw)
        .with_context(|| format!("failed to deserialize {ENV_CLUSTERS} as a JSON object"))
}

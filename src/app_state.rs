use std::sync::Arc;

use crate::core::client::cluster_registry::ClusterRegistry;
use crate::domain::workload::service::deployment_service::DeploymentService;
use crate::domain::workload::service::pod_service::PodService;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ClusterRegistry>,
    pub pod_service: Arc<PodService>,
    pub deployment_service: Arc<DeploymentService>,
}

pub fn build_app_state(registry: Arc<ClusterRegistry>) -> AppState {
    AppState {
        pod_service: Arc::new(PodService::new(Arc::clone(&registry))),
        deployment_service: Arc::new(DeploymentService::new(Arc::clone(&registry))),
        registry,
    }
}

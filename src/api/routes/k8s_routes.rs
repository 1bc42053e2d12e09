//! Workload routes (e.g., /api/k8s/*)

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::api::controller::k8s::cluster::K8sClusterController;
use crate::api::controller::k8s::deployment::K8sDeploymentController;
use crate::api::controller::k8s::pod::K8sPodController;
use crate::app_state::AppState;

pub fn k8s_routes() -> Router<AppState> {
    Router::new()
        .route("/clusters", get(K8sClusterController::list_clusters))

        .route("/pods", get(K8sPodController::list_pods))
        .route("/pod/detail", get(K8sPodController::get_pod_detail))
        .route("/pod/del", delete(K8sPodController::delete_pod))
        .route("/pod/update", put(K8sPodController::update_pod))
        .route("/pod/container", get(K8sPodController::get_pod_containers))
        .route("/pod/log", get(K8sPodController::get_pod_log))

        .route("/deployments", get(K8sDeploymentController::list_deployments))
        .route("/deployment/detail", get(K8sDeploymentController::get_deployment_detail))
        .route("/deployment/del", delete(K8sDeploymentController::delete_deployment))
        .route("/deployment/update", put(K8sDeploymentController::update_deployment))
        .route("/deployment/scale", put(K8sDeploymentController::scale_deployment))
        .route("/deployment/restart", put(K8sDeploymentController::restart_deployment))
        .route("/deployment/create", post(K8sDeploymentController::create_deployment))
}

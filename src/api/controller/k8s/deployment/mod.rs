use axum::extract::{Query, State};
use axum::Json;
use validator::Validate;

use crate::api::dto::workload_dto::{DeploymentRef, ListQuery, ScaleRequest, UpdateRequest};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::client::kube_resources::Deployment;
use crate::domain::workload::dto::deploy_create::DeployCreate;
use crate::domain::workload::service::ListResult;
use crate::errors::AppError;

pub struct K8sDeploymentController;

impl K8sDeploymentController {
    pub async fn list_deployments(
        State(state): State<AppState>,
        Query(q): Query<ListQuery>,
    ) -> Result<Json<ApiResponse<ListResult<Deployment>>>, AppError> {
        to_json(
            "Listed deployments successfully",
            state
                .deployment_service
                .list(&q.cluster, &q.filter_name, &q.namespace, q.limit, q.page)
                .await,
        )
    }

    pub async fn get_deployment_detail(
        State(state): State<AppState>,
        Query(q): Query<DeploymentRef>,
    ) -> Result<Json<ApiResponse<Deployment>>, AppError> {
        to_json(
            "Fetched deployment successfully",
            state
                .deployment_service
                .get(&q.cluster, &q.deployment_name, &q.namespace)
                .await,
        )
    }

    pub async fn delete_deployment(
        State(state): State<AppState>,
        Json(payload): Json<DeploymentRef>,
    ) -> Result<Json<ApiResponse<()>>, AppError> {
        to_json(
            "Deleted deployment successfully",
            state
                .deployment_service
                .delete(&payload.cluster, &payload.deployment_name, &payload.namespace)
                .await,
        )
    }

    pub async fn update_deployment(
        State(state): State<AppState>,
        Json(payload): Json<UpdateRequest>,
    ) -> Result<Json<ApiResponse<()>>, AppError> {
        to_json(
            "Updated deployment successfully",
            state
                .deployment_service
                .update(&payload.cluster, &payload.namespace, &payload.content)
                .await,
        )
    }

    /// Responds with the replica count the cluster accepted
    pub async fn scale_deployment(
        State(state): State<AppState>,
        Json(payload): Json<ScaleRequest>,
    ) -> Result<Json<ApiResponse<i32>>, AppError> {
        payload.validate()?;

        to_json(
            "Scaled deployment successfully",
            state
                .deployment_service
                .scale(
                    &payload.cluster,
                    &payload.deployment_name,
                    &payload.namespace,
                    payload.scale_num,
                )
                .await,
        )
    }

    pub async fn restart_deployment(
        State(state): State<AppState>,
        Json(payload): Json<DeploymentRef>,
    ) -> Result<Json<ApiResponse<()>>, AppError> {
        to_json(
            "Restarted deployment successfully",
            state
                .deployment_service
                .restart(&payload.cluster, &payload.deployment_name, &payload.namespace)
                .await,
        )
    }

    pub async fn create_deployment(
        State(state): State<AppState>,
        Json(payload): Json<DeployCreate>,
    ) -> Result<Json<ApiResponse<()>>, AppError> {
        payload.validate()?;

        to_json(
            "Created deployment successfully",
            state.deployment_service.create(&payload).await,
        )
    }
}

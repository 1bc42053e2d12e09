use axum::extract::{Query, State};
use axum::Json;

use crate::api::dto::workload_dto::{ListQuery, PodLogQuery, PodRef, UpdateRequest};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::client::kube_resources::Pod;
use crate::domain::workload::service::ListResult;
use crate::errors::AppError;

pub struct K8sPodController;

impl K8sPodController {
    pub async fn list_pods(
        State(state): State<AppState>,
        Query(q): Query<ListQuery>,
    ) -> Result<Json<ApiResponse<ListResult<Pod>>>, AppError> {
        to_json(
            "Listed pods successfully",
            state
                .pod_service
                .list(&q.cluster, &q.filter_name, &q.namespace, q.limit, q.page)
                .await,
        )
    }

    pub async fn get_pod_detail(
        State(state): State<AppState>,
        Query(q): Query<PodRef>,
    ) -> Result<Json<ApiResponse<Pod>>, AppError> {
        to_json(
            "Fetched pod successfully",
            state.pod_service.get(&q.cluster, &q.pod_name, &q.namespace).await,
        )
    }

    pub async fn delete_pod(
        State(state): State<AppState>,
        Json(payload): Json<PodRef>,
    ) -> Result<Json<ApiResponse<()>>, AppError> {
        to_json(
            "Deleted pod successfully",
            state
                .pod_service
                .delete(&payload.cluster, &payload.pod_name, &payload.namespace)
                .await,
        )
    }

    pub async fn update_pod(
        State(state): State<AppState>,
        Json(payload): Json<UpdateRequest>,
    ) -> Result<Json<ApiResponse<()>>, AppError> {
        to_json(
            "Updated pod successfully",
            state
                .pod_service
                .update(&payload.cluster, &payload.namespace, &payload.content)
                .await,
        )
    }

    pub async fn get_pod_containers(
        State(state): State<AppState>,
        Query(q): Query<PodRef>,
    ) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
        to_json(
            "Fetched pod containers successfully",
            state
                .pod_service
                .get_containers(&q.cluster, &q.pod_name, &q.namespace)
                .await,
        )
    }

    /// Tail of one container's log as a single string
    pub async fn get_pod_log(
        State(state): State<AppState>,
        Query(q): Query<PodLogQuery>,
    ) -> Result<Json<ApiResponse<String>>, AppError> {
        to_json(
            "Fetched container log successfully",
            state
                .pod_service
                .get_log(&q.cluster, &q.container_name, &q.pod_name, &q.namespace)
                .await,
        )
    }
}

use axum::extract::State;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct K8sClusterController;

impl K8sClusterController {
    /// Names of the clusters the gateway was configured with
    pub async fn list_clusters(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
        Ok(Json(ApiResponse::ok(
            "Listed clusters successfully",
            state.registry.cluster_names(),
        )))
    }
}

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::workload::error::GatewayError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationErrors),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Gateway(err) => match err {
                GatewayError::ClusterNotFound(_) => StatusCode::NOT_FOUND,
                GatewayError::DeserializationFailed { .. }
                | GatewayError::InvalidResourceQuantity { .. } => StatusCode::BAD_REQUEST,
                GatewayError::SerializationFailed { .. } | GatewayError::LogCopyFailed { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                GatewayError::UpstreamListFailed { .. }
                | GatewayError::UpstreamGetFailed { .. }
                | GatewayError::UpstreamDeleteFailed { .. }
                | GatewayError::UpstreamUpdateFailed { .. }
                | GatewayError::UpstreamCreateFailed { .. }
                | GatewayError::UpstreamScaleReadFailed { .. }
                | GatewayError::UpstreamScaleWriteFailed { .. }
                | GatewayError::UpstreamPatchFailed { .. }
                | GatewayError::UpstreamLogStreamFailed { .. } => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "msg": self.to_string(),
            "data": null
        }));

        (status, body).into_response()
    }
}

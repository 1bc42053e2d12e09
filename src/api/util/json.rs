use axum::Json;

use crate::api::dto::ApiResponse;
use crate::errors::AppError;

/// Wrap a service result into the response envelope, with `msg` on success.
pub fn to_json<T, E>(msg: &str, result: Result<T, E>) -> Result<Json<ApiResponse<T>>, AppError>
where
    T: serde::Serialize,
    E: Into<AppError>,
{
    match result {
        Ok(value) => Ok(Json(ApiResponse::ok(msg, value))),
        Err(err) => Err(err.into()),
    }
}

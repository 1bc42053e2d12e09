//! Request and response shapes of the HTTP API

pub mod workload_dto;

use serde::Serialize;

/// Envelope of every response: a human readable message and the payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub msg: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self {
            msg: msg.into(),
            data,
        }
    }
}

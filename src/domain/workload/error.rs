//! Error kinds returned by the workload services.
//!
//! Callers can tell "cluster unknown" apart from "remote operation failed",
//! but a missing object is reported as an ordinary upstream failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("cluster '{0}' does not exist, no client available")]
    ClusterNotFound(String),

    #[error("failed to list {kind}s: {source}")]
    UpstreamListFailed {
        kind: &'static str,
        #[source]
        source: kube::Error,
    },

    #[error("failed to get {kind} '{name}': {source}")]
    UpstreamGetFailed {
        kind: &'static str,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to delete {kind} '{name}': {source}")]
    UpstreamDeleteFailed {
        kind: &'static str,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to update {kind} '{name}': {source}")]
    UpstreamUpdateFailed {
        kind: &'static str,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to create {kind} '{name}': {source}")]
    UpstreamCreateFailed {
        kind: &'static str,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to read scale of deployment '{name}': {source}")]
    UpstreamScaleReadFailed {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to write scale of deployment '{name}': {source}")]
    UpstreamScaleWriteFailed {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to patch {kind} '{name}': {source}")]
    UpstreamPatchFailed {
        kind: &'static str,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to open log stream of pod '{pod}': {source}")]
    UpstreamLogStreamFailed {
        pod: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to copy log of pod '{pod}': {source}")]
    LogCopyFailed {
        pod: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to deserialize {kind}: {reason}")]
    DeserializationFailed { kind: &'static str, reason: String },

    #[error("failed to serialize {what}: {source}")]
    SerializationFailed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {resource} quantity '{value}'")]
    InvalidResourceQuantity { resource: &'static str, value: String },
}

pub type GatewayResult<T> = Result<T, GatewayError>;

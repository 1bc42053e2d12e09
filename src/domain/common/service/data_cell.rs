//! Uniform read view over resource kinds for the selection pipeline.

use chrono::{DateTime, Utc};

use crate::core::client::kube_resources::{Deployment, ObjectMeta, Pod};

/// What the selector needs from a record: a creation instant to sort on and
/// a name to filter on.
pub trait DataCell {
    fn creation(&self) -> DateTime<Utc>;
    fn name(&self) -> &str;
}

// A record without a creation timestamp sorts as the oldest possible one.
fn creation_of(metadata: &ObjectMeta) -> DateTime<Utc> {
    metadata
        .creation_timestamp
        .as_ref()
        .map(|ts| ts.0)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn name_of(metadata: &ObjectMeta) -> &str {
    metadata.name.as_deref().unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct PodCell(pub Pod);

impl DataCell for PodCell {
    fn creation(&self) -> DateTime<Utc> {
        creation_of(&self.0.metadata)
    }

    fn name(&self) -> &str {
        name_of(&self.0.metadata)
    }
}

impl From<Pod> for PodCell {
    fn from(pod: Pod) -> Self {
        Self(pod)
    }
}

impl From<PodCell> for Pod {
    fn from(cell: PodCell) -> Self {
        cell.0
    }
}

#[derive(Debug, Clone)]
pub struct DeploymentCell(pub Deployment);

impl DataCell for DeploymentCell {
    fn creation(&self) -> DateTime<Utc> {
        creation_of(&self.0.metadata)
    }

    fn name(&self) -> &str {
        name_of(&self.0.metadata)
    }
}

impl From<Deployment> for DeploymentCell {
    fn from(deployment: Deployment) -> Self {
        Self(deployment)
    }
}

impl From<DeploymentCell> for Deployment {
    fn from(cell: DeploymentCell) -> Self {
        cell.0
    }
}

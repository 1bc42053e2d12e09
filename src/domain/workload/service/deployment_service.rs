use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::core::client::cluster_registry::ClusterRegistry;
use crate::core::client::deployments::{
    create_deployment, delete_deployment, fetch_deployment_by_name_and_namespace,
    fetch_deployment_scale, fetch_deployments_by_namespace, patch_deployment,
    replace_deployment, replace_deployment_scale,
};
use crate::core::client::kube_resources::{
    Container, ContainerPort, Deployment, DeploymentSpec, HTTPGetAction, IntOrString,
    LabelSelector, ObjectMeta, PodSpec, PodTemplateSpec, Probe, Quantity, ResourceRequirements,
};
use crate::domain::common::model::DataSelectQuery;
use crate::domain::common::service::data_cell::DeploymentCell;
use crate::domain::common::service::data_selector::DataSelector;
use crate::domain::workload::dto::deploy_create::DeployCreate;
use crate::domain::workload::error::{GatewayError, GatewayResult};
use crate::domain::workload::service::quantity::validate_quantity;
use crate::domain::workload::service::{parse_manifest, ListResult};

const KIND: &str = "deployment";

/// Env var whose value changes on every restart, forcing a new rollout.
pub const RESTART_ENV: &str = "RESTART_";

const DECLARED_PORT: i32 = 80;
const READINESS_INITIAL_DELAY_SECONDS: i32 = 5;
const LIVENESS_INITIAL_DELAY_SECONDS: i32 = 15;
const PROBE_TIMEOUT_SECONDS: i32 = 15;
const PROBE_PERIOD_SECONDS: i32 = 5;

#[derive(Debug, Clone)]
pub struct DeploymentService {
    registry: Arc<ClusterRegistry>,
}

impl DeploymentService {
    pub fn new(registry: Arc<ClusterRegistry>) -> Self {
        Self { registry }
    }

    pub async fn list(
        &self,
        cluster: &str,
        filter_name: &str,
        namespace: &str,
        limit: i64,
        page: i64,
    ) -> GatewayResult<ListResult<Deployment>> {
        let client = self.registry.get_client(cluster)?.client();

        let deployments = fetch_deployments_by_namespace(client, namespace)
            .await
            .map_err(|source| {
                error!(cluster, namespace, "Failed to list deployments: {}", source);
                GatewayError::UpstreamListFailed { kind: KIND, source }
            })?;

        let cells = deployments.into_iter().map(DeploymentCell::from).collect();
        let selection =
            DataSelector::new(cells, DataSelectQuery::new(filter_name, limit, page)).select();

        Ok(ListResult {
            items: selection.items.into_iter().map(Deployment::from).collect(),
            total: selection.total,
        })
    }

    pub async fn get(
        &self,
        cluster: &str,
        deployment_name: &str,
        namespace: &str,
    ) -> GatewayResult<Deployment> {
        let client = self.registry.get_client(cluster)?.client();

        fetch_deployment_by_name_and_namespace(client, namespace, deployment_name)
            .await
            .map_err(|source| {
                error!(cluster, namespace, deployment_name, "Failed to get deployment: {}", source);
                GatewayError::UpstreamGetFailed {
                    kind: KIND,
                    name: deployment_name.to_string(),
                    source,
                }
            })
    }

    /// Replaces the stored deployment with the JSON manifest in `content`.
    ///
    /// No concurrency check is added. If the manifest carries a
    /// resourceVersion the API server rejects it when stale; without one the
    /// last writer wins.
    pub async fn update(&self, cluster: &str, namespace: &str, content: &str) -> GatewayResult<()> {
        let client = self.registry.get_client(cluster)?.client();
        let (name, deployment) = parse_manifest::<Deployment>(KIND, content).inspect_err(|e| {
            error!(cluster, namespace, "Rejected deployment manifest: {}", e);
        })?;

        replace_deployment(client, namespace, &name, &deployment)
            .await
            .map(|_| ())
            .map_err(|source| {
                error!(cluster, namespace, deployment_name = %name, "Failed to update deployment: {}", source);
                GatewayError::UpstreamUpdateFailed {
                    kind: KIND,
                    name,
                    source,
                }
            })
    }

    pub async fn delete(
        &self,
        cluster: &str,
        deployment_name: &str,
        namespace: &str,
    ) -> GatewayResult<()> {
        let client = self.registry.get_client(cluster)?.client();

        delete_deployment(client, namespace, deployment_name)
            .await
            .map_err(|source| {
                error!(cluster, namespace, deployment_name, "Failed to delete deployment: {}", source);
                GatewayError::UpstreamDeleteFailed {
                    kind: KIND,
                    name: deployment_name.to_string(),
                    source,
                }
            })
    }

    /// Sets the desired replica count through the scale sub-resource and
    /// returns the count the API server echoed back.
    ///
    /// Unguarded read-modify-write with no retry. The scale object read first
    /// still carries its resourceVersion, so a writer that slipped in between
    /// usually turns the write into a conflict error.
    pub async fn scale(
        &self,
        cluster: &str,
        deployment_name: &str,
        namespace: &str,
        replicas: i32,
    ) -> GatewayResult<i32> {
        let client = self.registry.get_client(cluster)?.client();

        let mut scale = fetch_deployment_scale(client.clone(), namespace, deployment_name)
            .await
            .map_err(|source| {
                error!(cluster, namespace, deployment_name, "Failed to read deployment scale: {}", source);
                GatewayError::UpstreamScaleReadFailed {
                    name: deployment_name.to_string(),
                    source,
                }
            })?;

        scale.spec.get_or_insert_with(Default::default).replicas = Some(replicas);
        let body = serde_json::to_vec(&scale)
            .map_err(|source| GatewayError::SerializationFailed { what: "scale", source })?;

        let updated = replace_deployment_scale(client, namespace, deployment_name, body)
            .await
            .map_err(|source| {
                error!(cluster, namespace, deployment_name, "Failed to write deployment scale: {}", source);
                GatewayError::UpstreamScaleWriteFailed {
                    name: deployment_name.to_string(),
                    source,
                }
            })?;

        Ok(updated
            .spec
            .and_then(|spec| spec.replicas)
            .unwrap_or_default())
    }

    /// Rolls the pods by stamping the current Unix time into the `RESTART_`
    /// env var of the container named after the deployment. A deployment
    /// without such a container gains one in the patch and the API server
    /// rejects it for lacking an image.
    pub async fn restart(
        &self,
        cluster: &str,
        deployment_name: &str,
        namespace: &str,
    ) -> GatewayResult<()> {
        let client = self.registry.get_client(cluster)?.client();

        let patch = restart_patch(deployment_name, chrono::Utc::now().timestamp())?;

        patch_deployment(client, namespace, deployment_name, &patch)
            .await
            .map(|_| ())
            .map_err(|source| {
                error!(cluster, namespace, deployment_name, "Failed to restart deployment: {}", source);
                GatewayError::UpstreamPatchFailed {
                    kind: KIND,
                    name: deployment_name.to_string(),
                    source,
                }
            })
    }

    /// Builds the deployment described by `deploy` and creates it in
    /// `deploy.cluster`. Quantities are checked before anything is sent.
    ///
    /// The selector is exactly `deploy.label`; overlapping selectors with an
    /// existing deployment are not detected.
    pub async fn create(&self, deploy: &DeployCreate) -> GatewayResult<()> {
        let client = self.registry.get_client(&deploy.cluster)?.client();
        let deployment = build_deployment(deploy).inspect_err(|e| {
            error!(cluster = %deploy.cluster, namespace = %deploy.namespace, "Rejected deployment: {}", e);
        })?;

        create_deployment(client, &deploy.namespace, &deployment)
            .await
            .map_err(|source| {
                error!(
                    cluster = %deploy.cluster,
                    namespace = %deploy.namespace,
                    deployment_name = %deploy.name,
                    "Failed to create deployment: {}",
                    source
                );
                GatewayError::UpstreamCreateFailed {
                    kind: KIND,
                    name: deploy.name.clone(),
                    source,
                }
            })?;

        info!(cluster = %deploy.cluster, "Created deployment {}/{}", deploy.namespace, deploy.name);
        Ok(())
    }
}

/// Assembles the Deployment object for `deploy`.
pub fn build_deployment(deploy: &DeployCreate) -> GatewayResult<Deployment> {
    validate_quantity("cpu", &deploy.cpu)?;
    validate_quantity("memory", &deploy.memory)?;

    let resources = BTreeMap::from([
        ("cpu".to_string(), Quantity(deploy.cpu.clone())),
        ("memory".to_string(), Quantity(deploy.memory.clone())),
    ]);

    let (readiness_probe, liveness_probe) = if deploy.health_check {
        (
            Some(http_probe(deploy, READINESS_INITIAL_DELAY_SECONDS)),
            Some(http_probe(deploy, LIVENESS_INITIAL_DELAY_SECONDS)),
        )
    } else {
        (None, None)
    };

    let container = Container {
        name: deploy.name.clone(),
        image: Some(deploy.image.clone()),
        ports: Some(vec![ContainerPort {
            name: Some("http".to_string()),
            protocol: Some("TCP".to_string()),
            container_port: DECLARED_PORT,
            ..ContainerPort::default()
        }]),
        // requests == limits
        resources: Some(ResourceRequirements {
            limits: Some(resources.clone()),
            requests: Some(resources),
            ..ResourceRequirements::default()
        }),
        readiness_probe,
        liveness_probe,
        ..Container::default()
    };

    Ok(Deployment {
        metadata: ObjectMeta {
            name: Some(deploy.name.clone()),
            namespace: Some(deploy.namespace.clone()),
            labels: Some(deploy.label.clone()),
            ..ObjectMeta::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(deploy.replicas),
            selector: LabelSelector {
                match_labels: Some(deploy.label.clone()),
                ..LabelSelector::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    name: Some(deploy.name.clone()),
                    labels: Some(deploy.label.clone()),
                    ..ObjectMeta::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![container],
                    ..PodSpec::default()
                }),
            },
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    })
}

fn http_probe(deploy: &DeployCreate, initial_delay_seconds: i32) -> Probe {
    Probe {
        http_get: Some(HTTPGetAction {
            path: Some(deploy.health_path.clone()),
            port: IntOrString::Int(deploy.container_port),
            ..HTTPGetAction::default()
        }),
        initial_delay_seconds: Some(initial_delay_seconds),
        timeout_seconds: Some(PROBE_TIMEOUT_SECONDS),
        period_seconds: Some(PROBE_PERIOD_SECONDS),
        ..Probe::default()
    }
}

#[derive(Serialize)]
struct RestartPatch<'a> {
    spec: RestartSpec<'a>,
}

#[derive(Serialize)]
struct RestartSpec<'a> {
    template: RestartTemplate<'a>,
}

#[derive(Serialize)]
struct RestartTemplate<'a> {
    spec: RestartPodSpec<'a>,
}

#[derive(Serialize)]
struct RestartPodSpec<'a> {
    containers: [RestartContainer<'a>; 1],
}

#[derive(Serialize)]
struct RestartContainer<'a> {
    name: &'a str,
    env: [RestartEnv; 1],
}

#[derive(Serialize)]
struct RestartEnv {
    name: &'static str,
    value: String,
}

/// Strategic merge patch touching only the `RESTART_` env var of the
/// container called `deployment_name`.
pub fn restart_patch(deployment_name: &str, timestamp: i64) -> GatewayResult<serde_json::Value> {
    let patch = RestartPatch {
        spec: RestartSpec {
            template: RestartTemplate {
                spec: RestartPodSpec {
                    containers: [RestartContainer {
                        name: deployment_name,
                        env: [RestartEnv {
                            name: RESTART_ENV,
                            value: timestamp.to_string(),
                        }],
                    }],
                },
            },
        },
    };

    serde_json::to_value(patch)
        .map_err(|source| GatewayError::SerializationFailed { what: "restart patch", source })
}

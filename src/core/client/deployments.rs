use kube::api::{DeleteParams, ListParams, Patch, PatchParams, PostParams};
use kube::{Api, Client};
use serde_json::Value;
use tracing::debug;

use crate::core::client::kube_resources::{Deployment, Scale};

/// Fetch deployments in a specific namespace; an empty namespace means all namespaces
pub async fn fetch_deployments_by_namespace(
    client: Client,
    namespace: &str,
) -> kube::Result<Vec<Deployment>> {
    let deployments: Api<Deployment> = if namespace.is_empty() {
        Api::all(client)
    } else {
        Api::namespaced(client, namespace)
    };
    let deployment_list = deployments.list(&ListParams::default()).await?;

    debug!(
        "Discovered {} deployment(s) in namespace '{}'",
        deployment_list.items.len(),
        namespace
    );
    Ok(deployment_list.items)
}

/// Fetch a single deployment by name and namespace
pub async fn fetch_deployment_by_name_and_namespace(
    client: Client,
    namespace: &str,
    deployment_name: &str,
) -> kube::Result<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);
    let deployment = deployments.get(deployment_name).await?;

    debug!("Fetched deployment: {}/{}", namespace, deployment_name);
    Ok(deployment)
}

pub async fn create_deployment(
    client: Client,
    namespace: &str,
    deployment: &Deployment,
) -> kube::Result<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);
    let created = deployments.create(&PostParams::default(), deployment).await?;

    debug!(
        "Created deployment: {}/{}",
        namespace,
        created.metadata.name.as_deref().unwrap_or("unknown")
    );
    Ok(created)
}

/// Full replace; whatever `deployment` carries overwrites the stored object
pub async fn replace_deployment(
    client: Client,
    namespace: &str,
    deployment_name: &str,
    deployment: &Deployment,
) -> kube::Result<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);
    let replaced = deployments
        .replace(deployment_name, &PostParams::default(), deployment)
        .await?;

    debug!("Replaced deployment: {}/{}", namespace, deployment_name);
    Ok(replaced)
}

pub async fn delete_deployment(
    client: Client,
    namespace: &str,
    deployment_name: &str,
) -> kube::Result<()> {
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);
    deployments
        .delete(deployment_name, &DeleteParams::default())
        .await?;

    debug!("Deleted deployment: {}/{}", namespace, deployment_name);
    Ok(())
}

/// Read the `scale` sub-resource
pub async fn fetch_deployment_scale(
    client: Client,
    namespace: &str,
    deployment_name: &str,
) -> kube::Result<Scale> {
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);
    deployments.get_scale(deployment_name).await
}

/// Replace the `scale` sub-resource with the serialized `Scale` in `body`
pub async fn replace_deployment_scale(
    client: Client,
    namespace: &str,
    deployment_name: &str,
    body: Vec<u8>,
) -> kube::Result<Scale> {
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);
    let scale = deployments
        .replace_scale(deployment_name, &PostParams::default(), body)
        .await?;

    debug!(
        "Scaled deployment {}/{} to {:?} replica(s)",
        namespace,
        deployment_name,
        scale.spec.as_ref().and_then(|s| s.replicas)
    );
    Ok(scale)
}

/// Apply `patch` as a strategic merge patch
pub async fn patch_deployment(
    client: Client,
    namespace: &str,
    deployment_name: &str,
    patch: &Value,
) -> kube::Result<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);
    let patched = deployments
        .patch(deployment_name, &PatchParams::default(), &Patch::Strategic(patch))
        .await?;

    debug!("Patched deployment: {}/{}", namespace, deployment_name);
    Ok(patched)
}

// Kube-rs based Kubernetes clients, one per configured cluster
pub mod cluster_registry;
pub mod kube_client;
pub mod kube_resources;

pub mod deployments;
pub mod pods;

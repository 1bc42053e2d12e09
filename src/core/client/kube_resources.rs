/// Re-export the Kubernetes resource types the gateway works with.
/// This module provides a centralized place for all K8s resource types

pub use k8s_openapi::api::core::v1::{
    Container,
    ContainerPort,
    HTTPGetAction,
    Pod,
    PodSpec,
    PodTemplateSpec,
    Probe,
    ResourceRequirements,
};

pub use k8s_openapi::api::apps::v1::{
    Deployment,
    DeploymentSpec,
};

pub use k8s_openapi::api::autoscaling::v1::Scale;

pub use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector,
    ObjectMeta,
    Time,
};

pub use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

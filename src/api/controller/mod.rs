//! Controllers: HTTP handlers delegating to the workload services

pub mod k8s;

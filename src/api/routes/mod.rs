//! API route declarations (e.g., /api/k8s/*)

pub mod k8s_routes;

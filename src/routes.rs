use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    Router::new()
        // Root route
        .route("/", get(root))
        // Health check
        .route("/health", get(health_check))
        .nest("/api/k8s", crate::api::routes::k8s_routes::k8s_routes())

        // Fallback handler for 404
        .fallback(handler_404)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

async fn root() -> &'static str {
    "Server is running!"
}

async fn health_check() -> Json<Value> {
    Json(json!({ "code": 200, "success": true }))
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use chrono::Utc;
    use httpmock::prelude::*;
    use tokio::net::TcpListener;

    use super::*;
    use crate::app_state::build_app_state;
    use crate::testutils::{pod_list, registry_for, test_pod};

    /// Serves the router on an ephemeral port, backed by `server` as `TST-1`.
    async fn spawn_gateway(server: &MockServer) -> SocketAddr {
        let app = app_router().with_state(build_app_state(registry_for(server)));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn health_and_fallback() {
        let server = MockServer::start_async().await;
        let addr = spawn_gateway(&server).await;

        let health = reqwest::get(format!("http://{addr}/health")).await.unwrap();
        assert_eq!(health.status(), 200);
        let body: Value = health.json().await.unwrap();
        assert_eq!(body, json!({ "code": 200, "success": true }));

        let missing = reqwest::get(format!("http://{addr}/nope")).await.unwrap();
        assert_eq!(missing.status(), 404);
    }

    #[tokio::test]
    async fn lists_pods_in_envelope() {
        let server = MockServer::start_async().await;
        let pods = vec![test_pod("web-0", Utc::now())];
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/namespaces/default/pods");
                then.status(200).json_body(pod_list(&pods));
            })
            .await;
        let addr = spawn_gateway(&server).await;

        let resp = reqwest::get(format!(
            "http://{addr}/api/k8s/pods?cluster=TST-1&namespace=default&limit=10&page=1"
        ))
        .await
        .unwrap();

        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["msg"], "Listed pods successfully");
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["metadata"]["name"], "web-0");
    }

    #[tokio::test]
    async fn omitted_namespace_lists_all_namespaces() {
        let server = MockServer::start_async().await;
        let pods = vec![test_pod("web-0", Utc::now())];
        let all = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/pods");
                then.status(200).json_body(pod_list(&pods));
            })
            .await;
        let addr = spawn_gateway(&server).await;

        let resp = reqwest::get(format!("http://{addr}/api/k8s/pods?cluster=TST-1"))
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        all.assert_async().await;
    }

    #[tokio::test]
    async fn unknown_cluster_is_404_with_message() {
        let server = MockServer::start_async().await;
        let addr = spawn_gateway(&server).await;

        let resp = reqwest::get(format!(
            "http://{addr}/api/k8s/deployment/detail?cluster=nowhere&namespace=default&deployment_name=web"
        ))
        .await
        .unwrap();

        assert_eq!(resp.status(), 404);
        let body: Value = resp.json().await.unwrap();
        assert!(body["msg"].as_str().unwrap().contains("nowhere"));
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn invalid_create_is_rejected_before_any_call() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(201);
            })
            .await;
        let addr = spawn_gateway(&server).await;

        let resp = reqwest::Client::new()
            .post(format!("http://{addr}/api/k8s/deployment/create"))
            .json(&json!({
                "name": "web", "namespace": "default", "replicas": -2,
                "image": "nginx", "label": {"app": "web"},
                "cpu": "1", "memory": "1Gi", "container_port": 80,
                "health_check": false, "health_path": "", "cluster": "TST-1"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn negative_scale_is_rejected() {
        let server = MockServer::start_async().await;
        let addr = spawn_gateway(&server).await;

        let resp = reqwest::Client::new()
            .put(format!("http://{addr}/api/k8s/deployment/scale"))
            .json(&json!({
                "deployment_name": "web", "scale_num": -1,
                "namespace": "default", "cluster": "TST-1"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn lists_configured_clusters() {
        let server = MockServer::start_async().await;
        let addr = spawn_gateway(&server).await;

        let body: Value = reqwest::get(format!("http://{addr}/api/k8s/clusters"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["data"], json!(["TST-1"]));
    }
}

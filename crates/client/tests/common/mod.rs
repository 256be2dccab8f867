#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use serde_json::{json, Value};

use plm_client::{ApiClient, CredentialProvider, NoCredentials};

/// Serve `routes` under `/api` on an ephemeral local port.
///
/// Returns the base URL (ending in `/api`) to point a client at.
pub async fn spawn_backend(routes: Router) -> String {
    let app = Router::new().nest("/api", routes);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// Client without credentials.
pub fn client(base_url: &str) -> ApiClient {
    client_with(base_url, Arc::new(NoCredentials))
}

pub fn client_with(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> ApiClient {
    ApiClient::with_client(reqwest::Client::new(), base_url, credentials)
}

/// A status body as the backend sends it.
pub fn status_json(id: i64, name: &str, color: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} stage"),
        "statusColorHex": color,
        "sortOrder": id,
        "active": 1,
    })
}

/// Workflow 7: Concept (1) -> Design (2) -> Approved (3), listed out of order.
pub fn workflow_json() -> Value {
    json!({
        "id": 7,
        "name": "Footwear",
        "active": 1,
        "isDefault": 0,
        "workflowStatuses": [
            {"id": 72, "orderIndex": 2, "status": status_json(3, "Approved", "#0ea5e9")},
            {"id": 70, "orderIndex": 0, "status": status_json(1, "Concept", "#6366f1")},
            {"id": 71, "orderIndex": 1, "status": status_json(2, "Design", "#f97316")},
        ],
    })
}

/// Product 12 in workflow 7 with the given status.
pub fn product_json(status_id: i64) -> Value {
    let (name, color) = match status_id {
        1 => ("Concept", "#6366f1"),
        2 => ("Design", "#f97316"),
        _ => ("Approved", "#0ea5e9"),
    };
    json!({
        "id": 12,
        "name": "Basic Sneaker",
        "description": "Everyday sneaker",
        "productCategory": {"id": 3, "name": "Sneakers"},
        "productStatus": status_json(status_id, name, color),
        "workflowId": 7,
        "createdBy": {"id": 5},
    })
}

//! Integration tests for status changes and the tracked product cache.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;

use common::{client, product_json, spawn_backend, workflow_json};
use plm_client::{StatusChangeError, StatusSequencer, TrackedProduct};
use plm_core::sequencer::StatusPosition;

/// Backend with product 12 (currently Design) and workflow 7. Status
/// changes are answered by `on_change(body, attempt)`, where `attempt`
/// counts from 1.
fn backend<F>(hits: Arc<AtomicUsize>, on_change: F) -> Router
where
    F: Fn(Value, usize) -> Response + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/products/{id}", get(|| async { Json(product_json(2)) }))
        .route("/workflows/{id}", get(|| async { Json(workflow_json()) }))
        .route(
            "/products/{id}/status",
            put(move |Path(id): Path<i64>, Json(body): Json<Value>| {
                let hits = hits.clone();
                let on_change = on_change.clone();
                async move {
                    assert_eq!(id, 12);
                    let attempt = hits.fetch_add(1, Ordering::SeqCst) + 1;
                    on_change(body, attempt)
                }
            }),
        )
}

fn accept(body: Value) -> Response {
    let status_id = body["statusId"].as_i64().unwrap();
    Json(product_json(status_id)).into_response()
}

fn reject_missing_fields() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": "Missing fields",
            "missingRequiredFields": ["colour", "price"],
        })),
    )
        .into_response()
}

async fn tracked(base: &str) -> (StatusSequencer, TrackedProduct) {
    let api = client(base);
    let product = TrackedProduct::load(&api, 12).await.unwrap();
    (StatusSequencer::new(Arc::new(api)), product)
}

fn positions(product: &TrackedProduct) -> Vec<StatusPosition> {
    product.positions().iter().map(|c| c.position).collect()
}

#[tokio::test]
async fn load_fetches_workflow_by_id() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_backend(backend(hits, |body, _| accept(body))).await;

    let (_, product) = tracked(&base).await;

    assert_eq!(product.workflow().id, 7);
    assert_eq!(
        positions(&product),
        vec![
            StatusPosition::Behind,
            StatusPosition::Current,
            StatusPosition::Ahead
        ]
    );
    assert_eq!(
        product.advisory_missing_fields(3).unwrap(),
        Vec::<String>::new()
    );
}

#[tokio::test]
async fn accepted_change_replaces_cached_product() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_backend(backend(hits.clone(), |body, _| accept(body))).await;
    let (sequencer, mut product) = tracked(&base).await;

    let updated = product.change_status(&sequencer, 3).await.unwrap();
    assert_eq!(updated.status_id(), Some(3));

    assert_eq!(product.product().status_id(), Some(3));
    assert_eq!(product.product().workflow_id(), Some(7));
    assert_eq!(
        positions(&product),
        vec![
            StatusPosition::Behind,
            StatusPosition::Behind,
            StatusPosition::Current
        ]
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_change_keeps_product_and_flags_fields() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_backend(backend(hits.clone(), |body, attempt| {
        if attempt == 1 {
            reject_missing_fields()
        } else {
            accept(body)
        }
    }))
    .await;
    let (sequencer, mut product) = tracked(&base).await;

    let err = product.change_status(&sequencer, 3).await.unwrap_err();
    assert_matches!(
        err,
        StatusChangeError::Rejected { status: 400, ref message, .. } if message == "Missing fields"
    );
    assert_eq!(
        err.missing_required_fields(),
        Some(&["colour".to_string(), "price".to_string()][..])
    );
    assert_eq!(product.product().status_id(), Some(2));
    assert_eq!(product.flagged_fields(), ["colour", "price"]);
    assert!(!product.is_pending(&sequencer));

    product.change_status(&sequencer, 3).await.unwrap();
    assert!(product.flagged_fields().is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn server_error_is_failed_without_fields() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_backend(backend(hits, |_, _| {
        (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
    }))
    .await;
    let (sequencer, mut product) = tracked(&base).await;

    let err = product.change_status(&sequencer, 1).await.unwrap_err();

    assert_matches!(err, StatusChangeError::Failed(ref api) if api.status() == 500);
    assert_eq!(err.missing_required_fields(), None);
    assert_eq!(err.message(), "database unavailable");
    assert_eq!(product.product().status_id(), Some(2));
    assert!(product.flagged_fields().is_empty());
}

#[tokio::test]
async fn status_outside_workflow_is_not_sent() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_backend(backend(hits.clone(), |body, _| accept(body))).await;
    let (sequencer, mut product) = tracked(&base).await;

    let err = product.change_status(&sequencer, 99).await.unwrap_err();

    assert_matches!(err, StatusChangeError::NotInWorkflow { status_id: 99 });
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn second_request_while_pending_is_refused() {
    let release = Arc::new(Notify::new());
    let hits = Arc::new(AtomicUsize::new(0));

    let gate = release.clone();
    let counter = hits.clone();
    let routes = Router::new().route(
        "/products/{id}/status",
        put(move |Json(body): Json<Value>| {
            let gate = gate.clone();
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                gate.notified().await;
                accept(body)
            }
        }),
    );
    let base = spawn_backend(routes).await;
    let sequencer = Arc::new(StatusSequencer::new(Arc::new(client(&base))));

    let first = tokio::spawn({
        let sequencer = sequencer.clone();
        async move { sequencer.request_status_change(12, 3).await }
    });

    tokio::time::timeout(Duration::from_secs(5), async {
        while !sequencer.is_pending(12) {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();

    let err = sequencer.request_status_change(12, 1).await.unwrap_err();
    assert_matches!(err, StatusChangeError::AlreadyPending { product_id: 12 });

    release.notify_one();
    let product = first.await.unwrap().unwrap();
    assert_eq!(product.status_id(), Some(3));

    assert!(!sequencer.is_pending(12));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

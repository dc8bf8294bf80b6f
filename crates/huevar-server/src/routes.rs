//! HTTP routes.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | liveness text |
//! | POST | `/generateColorVariations` | [`VariationService::generate`] |
//! | DELETE | `/deleteVariations` | [`VariationService::delete_variations`] |
//! | GET | `/objects/*key` | [`VariationService::fetch_object`] |

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use crate::error::{Result, ServerError};
use crate::service::{DeleteResponse, GenerateResponse, VariationRequest, VariationService};

/// Query string of a signed object URL.
#[derive(Debug, Default, Deserialize)]
struct ObjectQuery {
    expires: Option<u64>,
    signature: Option<String>,
}

/// Builds the application router.
pub fn router(service: Arc<VariationService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/generateColorVariations", post(generate_variations))
        .route("/deleteVariations", delete(delete_variations))
        .route("/objects/*key", get(fetch_object))
        .with_state(service)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(service: Arc<VariationService>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn root() -> &'static str {
    "Hello World!"
}

/// Treats an unreadable body as a request with no parameters.
fn request_or_default(body: std::result::Result<Json<VariationRequest>, JsonRejection>) -> VariationRequest {
    match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable request body");
            VariationRequest::default()
        }
    }
}

async fn run_blocking<T, F>(service: Arc<VariationService>, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&VariationService) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(ServerError::internal)?
}

async fn generate_variations(
    State(service): State<Arc<VariationService>>,
    body: std::result::Result<Json<VariationRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>> {
    tracing::debug!("/generateColorVariations");
    let request = request_or_default(body);
    request.params()?;
    let response = run_blocking(service, move |s| s.generate(&request)).await?;
    Ok(Json(response))
}

async fn delete_variations(
    State(service): State<Arc<VariationService>>,
    body: std::result::Result<Json<VariationRequest>, JsonRejection>,
) -> Result<Json<DeleteResponse>> {
    tracing::debug!("/deleteVariations");
    let request = request_or_default(body);
    request.params()?;
    let response = run_blocking(service, move |s| s.delete_variations(&request)).await?;
    Ok(Json(response))
}

async fn fetch_object(
    State(service): State<Arc<VariationService>>,
    Path(key): Path<String>,
    Query(query): Query<ObjectQuery>,
) -> Result<Response> {
    let object = run_blocking(service, move |s| {
        s.fetch_object(&key, query.expires, query.signature.as_deref())
    })
    .await?;
    Ok(([(header::CONTENT_TYPE, object.content_type)], object.data).into_response())
}

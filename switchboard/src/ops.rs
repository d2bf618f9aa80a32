//! HTTP surfaces of the binary: the ops API (domain resolution plus an
//! end-to-end probe) and the admin listener for health checks.

use crate::config::Listener;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use domains::DomainResolver;
use gateway::{GatewayError, RequestGateway, RequestOptions};
use serde::Deserialize;
use tokio::net::TcpListener;

pub async fn serve_ops(
    listener: &Listener,
    resolver: DomainResolver,
    gateway: RequestGateway,
) -> Result<(), std::io::Error> {
    let app = Router::new()
        .merge(domains::api::router(resolver))
        .merge(Router::new().route("/probe", get(probe_handler)).with_state(gateway));

    let tcp = TcpListener::bind(format!("{}:{}", listener.host, listener.port)).await?;
    axum::serve(tcp, app).await
}

pub async fn serve_admin(listener: &Listener) -> Result<(), std::io::Error> {
    let app = Router::new()
        .route("/health", get(|| async { "ok\n" }))
        .route("/ready", get(|| async { "ok\n" }));

    let tcp = TcpListener::bind(format!("{}:{}", listener.host, listener.port)).await?;
    axum::serve(tcp, app).await
}

#[derive(Deserialize, Debug)]
struct ProbeParams {
    account: String,
    service: String,
    path: String,
}

/// Issues a real gateway fetch against one tenant service, with the
/// caller's bearer token passed through. Operator tooling for verifying
/// resolution and upstream reachability end to end.
async fn probe_handler(
    State(gateway): State<RequestGateway>,
    headers: http::HeaderMap,
    Query(params): Query<ProbeParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let token = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let envelope = gateway
        .fetch::<serde_json::Value>(
            &params.service,
            &params.account,
            &params.path,
            token,
            &RequestOptions::default(),
        )
        .await
        .map_err(probe_status)?;

    Ok(Json(envelope.body))
}

fn probe_status(error: GatewayError) -> (StatusCode, String) {
    let status = match &error {
        GatewayError::Resolve(domains::ResolveError::NotFound { .. }) => StatusCode::NOT_FOUND,
        GatewayError::UpstreamStatus { status, .. } => *status,
        GatewayError::MissingRevision { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };

    (status, error.to_string())
}

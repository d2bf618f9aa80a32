//! Ops API for domain resolution: resolve one name, or drop an account's
//! cached directory (e.g. after a tenant re-auth).

use crate::resolver::{DomainResolver, ResolveError};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

pub fn router(resolver: DomainResolver) -> Router {
    Router::new()
        .route("/domains", get(resolve_handler))
        .route("/invalidate", post(invalidate_handler))
        .with_state(resolver)
}

#[derive(Deserialize, Debug)]
struct ResolveParams {
    account: String,
    service: String,
}

#[derive(Serialize)]
struct ResolveResponse {
    service: String,
    base_uri: String,
}

async fn resolve_handler(
    State(resolver): State<DomainResolver>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<ResolveResponse>, ResolveError> {
    let base_uri = resolver.resolve(&params.account, &params.service).await?;

    Ok(Json(ResolveResponse {
        service: params.service,
        base_uri,
    }))
}

#[derive(Deserialize, Debug)]
struct InvalidateParams {
    account: String,
}

async fn invalidate_handler(
    State(resolver): State<DomainResolver>,
    Query(params): Query<InvalidateParams>,
) -> StatusCode {
    resolver.invalidate(&params.account);
    StatusCode::NO_CONTENT
}

#[derive(Serialize)]
struct ApiErrorResponse {
    error_message: String,
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        let status = match self {
            ResolveError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResolveError::Directory(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ApiErrorResponse {
            error_message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::DirectoryClient;
    use serde_json::json;
    use shared::dispatch::RateLimitedDispatcher;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn start_api(mock_server: &MockServer) -> String {
        let dispatcher = RateLimitedDispatcher::new(4, Duration::ZERO);
        let client = DirectoryClient::new(dispatcher, mock_server.uri());
        let resolver = DomainResolver::new(client, Duration::from_secs(60));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(resolver);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_resolve_endpoint() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/account/acct-1/service/baseURI.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"service": "admin-area", "account": "acct-1", "baseURI": "va7.engagecloud.net"}
            ])))
            .mount(&mock_server)
            .await;

        let api = start_api(&mock_server).await;
        let http = reqwest::Client::new();

        let response = http
            .get(format!("{api}/domains?account=acct-1&service=admin-area"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["base_uri"], "va7.engagecloud.net");

        let missing = http
            .get(format!("{api}/domains?account=acct-1&service=nope"))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), 404);
    }
}

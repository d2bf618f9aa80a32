//! Client for the platform's directory resolution call.

use crate::types::ServiceEndpoint;
use shared::dispatch::{DispatchError, RateLimitedDispatcher};

#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    #[error("invalid directory URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("directory call failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("directory call failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("directory call for account {account} returned {status}")]
    Status {
        account: String,
        status: reqwest::StatusCode,
    },
}

pub struct DirectoryClient {
    dispatcher: RateLimitedDispatcher,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(dispatcher: RateLimitedDispatcher, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        DirectoryClient {
            dispatcher,
            base_url,
        }
    }

    /// One GET per account, returning the directly-resolved endpoint rows.
    /// Any failure is fatal to the caller: retry policy lives above the
    /// resolver, not here.
    pub async fn fetch(&self, account: &str) -> Result<Vec<ServiceEndpoint>, DirectoryError> {
        let url = url::Url::parse(&format!(
            "{}/api/account/{}/service/baseURI.json",
            self.base_url, account
        ))?;

        let request = self.dispatcher.client().get(url).build()?;
        let response = self.dispatcher.dispatch(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                account: account.to_string(),
                status,
            });
        }

        Ok(response.json::<Vec<ServiceEndpoint>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_dispatcher() -> RateLimitedDispatcher {
        RateLimitedDispatcher::new(4, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;

        let rows = json!([
            {"service": "admin-area", "account": "acct-1", "baseURI": "va7.engagecloud.net"},
            {"service": "async-messaging", "account": "acct-1", "baseURI": "msg.va.engagecloud.net"}
        ]);

        Mock::given(method("GET"))
            .and(path("/api/account/acct-1/service/baseURI.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows))
            .expect(1)
            .mount(&mock_server)
            .await;

        // Trailing slash on the base URL is tolerated
        let client = DirectoryClient::new(test_dispatcher(), format!("{}/", mock_server.uri()));
        let endpoints = client.fetch("acct-1").await.unwrap();

        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].service, "admin-area");
        assert_eq!(endpoints[1].base_uri, "msg.va.engagecloud.net");
    }

    #[tokio::test]
    async fn test_fetch_error_status_no_retry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/account/acct-1/service/baseURI.json"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = DirectoryClient::new(test_dispatcher(), mock_server.uri());
        let result = client.fetch("acct-1").await;

        assert!(matches!(
            result,
            Err(DirectoryError::Status { status, .. }) if status == 503
        ));
    }
}

//! The uniform request layer every resource service calls into.
//!
//! Centralizing query assembly, auth headers, conditional writes and
//! revision discovery here is what keeps the ~30 resource services as pure
//! data-shape mappers: each declares a service name and an API version and
//! calls the four verbs. The gateway performs no retries and no silent
//! recovery; failures surface with account/path/status context attached.

use crate::errors::GatewayError;
use crate::headers::{bearer, extract_revision};
use crate::metrics_defs::{GATEWAY_REQUEST_SECONDS, GATEWAY_UPSTREAM_ERRORS};
use crate::options::{RequestOptions, ResponseEnvelope};
use crate::query::append_query;
use domains::DomainResolver;
use http::Method;
use http::header::{AUTHORIZATION, IF_MATCH};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::dispatch::RateLimitedDispatcher;
use shared::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

struct GatewayInner {
    resolver: DomainResolver,
    dispatcher: RateLimitedDispatcher,
}

/// Composes the domain resolver and the rate-limited dispatcher into the
/// four verbs. Cheap to clone; clones share the resolver caches and the
/// dispatcher's limits.
#[derive(Clone)]
pub struct RequestGateway {
    inner: Arc<GatewayInner>,
}

impl RequestGateway {
    pub fn new(resolver: DomainResolver, dispatcher: RateLimitedDispatcher) -> Self {
        RequestGateway {
            inner: Arc::new(GatewayInner {
                resolver,
                dispatcher,
            }),
        }
    }

    pub async fn fetch<T: DeserializeOwned>(
        &self,
        service: &str,
        account: &str,
        path: &str,
        token: &str,
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope<T>, GatewayError> {
        self.execute(Method::GET, service, account, path, token, None::<&()>, options)
            .await
    }

    pub async fn create<B, T>(
        &self,
        service: &str,
        account: &str,
        path: &str,
        token: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, service, account, path, token, Some(body), options)
            .await
    }

    /// Full replacement of an existing resource. `options.revision` is
    /// required; the upstream rejects writes against a stale revision.
    pub async fn replace<B, T>(
        &self,
        service: &str,
        account: &str,
        path: &str,
        token: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, service, account, path, token, Some(body), options)
            .await
    }

    /// Deletion of an existing resource. `options.revision` is required.
    pub async fn remove<T: DeserializeOwned>(
        &self,
        service: &str,
        account: &str,
        path: &str,
        token: &str,
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope<T>, GatewayError> {
        self.execute(Method::DELETE, service, account, path, token, None::<&()>, options)
            .await
    }

    async fn execute<B, T>(
        &self,
        method: Method,
        service: &str,
        account: &str,
        path: &str,
        token: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mutation = method == Method::PUT || method == Method::DELETE;
        if mutation && options.revision.is_none() {
            return Err(GatewayError::MissingRevision {
                path: path.to_string(),
            });
        }

        let base_uri = self.inner.resolver.resolve(account, service).await?;

        let mut url = Url::parse(&format!("{}{path}", base_url(&base_uri))).map_err(|source| {
            GatewayError::InvalidUrl {
                path: path.to_string(),
                source,
            }
        })?;
        append_query(&mut url, options);

        let mut builder = self
            .inner
            .dispatcher
            .client()
            .request(method, url)
            .header(AUTHORIZATION, bearer(token));
        if let Some(revision) = &options.revision {
            builder = builder.header(IF_MATCH, revision);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder.build().map_err(|source| GatewayError::Request {
            path: path.to_string(),
            source,
        })?;

        let started = Instant::now();
        let response = self
            .inner
            .dispatcher
            .dispatch(request)
            .await
            .map_err(|source| GatewayError::Transport {
                account: account.to_string(),
                path: path.to_string(),
                source,
            })?;
        histogram!(GATEWAY_REQUEST_SECONDS).record(started.elapsed().as_secs_f64());

        let status = response.status();
        if !status.is_success() {
            counter!(GATEWAY_UPSTREAM_ERRORS).increment(1);
            tracing::warn!(account, path, %status, "upstream call failed");
            return Err(GatewayError::UpstreamStatus {
                status,
                account: account.to_string(),
                path: path.to_string(),
            });
        }

        let headers = response.headers().clone();
        let revision = extract_revision(&headers);
        let body = response
            .json::<T>()
            .await
            .map_err(|source| GatewayError::Decode {
                account: account.to_string(),
                path: path.to_string(),
                source,
            })?;

        Ok(ResponseEnvelope {
            body,
            revision,
            headers,
        })
    }
}

/// Directory rows carry bare hosts, which the platform serves over https;
/// scheme-qualified base URIs are honored as-is.
fn base_url(base_uri: &str) -> String {
    if base_uri.starts_with("http://") || base_uri.starts_with("https://") {
        base_uri.to_string()
    } else {
        format!("https://{base_uri}")
    }
}

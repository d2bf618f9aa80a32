use indexmap::IndexMap;

/// What a resource service declares about itself: the logical name used for
/// domain resolution and the API version its upstream family speaks.
/// Everything else a resource service needs comes from the gateway verbs.
#[derive(Clone, Debug)]
pub struct ServiceProfile {
    pub service: String,
    pub api_version: String,
}

impl ServiceProfile {
    pub fn new(service: impl Into<String>, api_version: impl Into<String>) -> Self {
        ServiceProfile {
            service: service.into(),
            api_version: api_version.into(),
        }
    }

    /// Options pre-filled with this profile's API version.
    pub fn options(&self) -> RequestOptions {
        RequestOptions::new(self.api_version.clone())
    }
}

/// Per-call request options. The typed fields cover the load-bearing common
/// cases; `extra_params` carries the genuinely per-resource query
/// parameters, appended in caller order.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub api_version: String,
    /// Conditional-write token; required for replace and remove.
    pub revision: Option<String>,
    pub select_fields: Option<String>,
    pub include_deleted: bool,
    pub source_tag: Option<String>,
    pub extra_params: IndexMap<String, String>,
}

impl RequestOptions {
    pub fn new(api_version: impl Into<String>) -> Self {
        RequestOptions {
            api_version: api_version.into(),
            ..Default::default()
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

/// What every verb returns: the response body, the concurrency token for
/// the next conditional write, and the raw upstream headers.
#[derive(Debug)]
pub struct ResponseEnvelope<T> {
    pub body: T,
    /// Absent when the upstream sent neither revision header; the resource
    /// does not support conditional writes in that case.
    pub revision: Option<String>,
    pub headers: http::HeaderMap,
}

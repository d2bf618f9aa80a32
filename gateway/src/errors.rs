use http::StatusCode;
use shared::dispatch::DispatchError;

#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    /// Domain resolution failed, or the service name is unknown for the
    /// account; the inner error distinguishes the two.
    #[error("domain resolution failed: {0}")]
    Resolve(#[from] domains::ResolveError),

    /// Replace or remove was called without a revision. Raised before any
    /// network activity.
    #[error("a revision is required for conditional writes to {path}")]
    MissingRevision { path: String },

    #[error("invalid request URL for {path}: {source}")]
    InvalidUrl {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not build upstream request for {path}: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream call failed for account {account} at {path}: {source}")]
    Transport {
        account: String,
        path: String,
        #[source]
        source: DispatchError,
    },

    #[error("upstream returned {status} for account {account} at {path}")]
    UpstreamStatus {
        status: StatusCode,
        account: String,
        path: String,
    },

    #[error("could not read upstream response for account {account} at {path}: {source}")]
    Decode {
        account: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

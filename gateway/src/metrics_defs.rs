//! Metrics definitions for the request gateway.

use shared::metrics_defs::{MetricDef, MetricType};

pub const GATEWAY_REQUEST_SECONDS: MetricDef = MetricDef {
    name: "gateway.request.duration",
    metric_type: MetricType::Histogram,
    description: "Time from dispatch to response headers for one gateway call, in seconds",
};

pub const GATEWAY_UPSTREAM_ERRORS: MetricDef = MetricDef {
    name: "gateway.upstream.errors",
    metric_type: MetricType::Counter,
    description: "Number of gateway calls that ended in a non-2xx upstream status",
};

// TODO: all metrics must be added here for now, this can be done dynamically with a macro in the future.
pub const ALL_METRICS: &[MetricDef] = &[GATEWAY_REQUEST_SECONDS, GATEWAY_UPSTREAM_ERRORS];

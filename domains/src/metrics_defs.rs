//! Metrics definitions for domain resolution.

use shared::metrics_defs::{MetricDef, MetricType};

pub const DIRECTORY_CACHE_HIT: MetricDef = MetricDef {
    name: "directory_cache.hit",
    metric_type: MetricType::Counter,
    description: "Number of resolutions served from the cached directory",
};

pub const DIRECTORY_CACHE_MISS: MetricDef = MetricDef {
    name: "directory_cache.miss",
    metric_type: MetricType::Counter,
    description: "Number of resolutions that required an upstream directory call",
};

pub const DIRECTORY_FETCH_ROWS: MetricDef = MetricDef {
    name: "directory.fetch.rows",
    metric_type: MetricType::Histogram,
    description: "Number of endpoint rows returned by one directory call",
};

// TODO: all metrics must be added here for now, this can be done dynamically with a macro in the future.
pub const ALL_METRICS: &[MetricDef] = &[
    DIRECTORY_CACHE_HIT,
    DIRECTORY_CACHE_MISS,
    DIRECTORY_FETCH_ROWS,
];

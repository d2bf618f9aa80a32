//! Common types for metrics definitions.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
}

impl MetricType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "Counter",
            MetricType::Gauge => "Gauge",
            MetricType::Histogram => "Histogram",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

#[macro_export]
macro_rules! counter {
    ($def:expr) => {
        metrics::counter!($def.name)
    };
}

#[macro_export]
macro_rules! gauge {
    ($def:expr) => {
        metrics::gauge!($def.name)
    };
}

#[macro_export]
macro_rules! histogram {
    ($def:expr) => {
        metrics::histogram!($def.name)
    };
}

pub const DISPATCH_INFLIGHT: MetricDef = MetricDef {
    name: "dispatch.inflight",
    metric_type: MetricType::Gauge,
    description: "Number of upstream calls currently in flight",
};

pub const DISPATCH_WAIT_SECONDS: MetricDef = MetricDef {
    name: "dispatch.wait.duration",
    metric_type: MetricType::Histogram,
    description: "Time a call spent queued before admission, in seconds",
};

// TODO: all metrics must be added here for now, this can be done dynamically with a macro in the future.
pub const ALL_METRICS: &[MetricDef] = &[DISPATCH_INFLIGHT, DISPATCH_WAIT_SECONDS];

pub mod dispatch;
pub mod metrics_defs;

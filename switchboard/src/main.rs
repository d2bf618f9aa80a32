mod config;
mod ops;

use clap::Parser;
use config::{Config, MetricsConfig};
use domains::DomainResolver;
use domains::directory::DirectoryClient;
use gateway::RequestGateway;
use metrics_exporter_statsd::StatsdBuilder;
use shared::dispatch::RateLimitedDispatcher;
use shared::metrics_defs::MetricType;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "switchboard", about = "Admin-console gateway core")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, short)]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let switchboard_config = match Config::from_file(&cli.config) {
        Ok(switchboard_config) => switchboard_config,
        Err(err) => {
            eprintln!("could not load config: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = switchboard_config.validate() {
        eprintln!("invalid config: {err}");
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Keep the guard alive for the lifetime of the process
    let _sentry_guard = switchboard_config.logging.as_ref().map(|logging| {
        sentry::init((
            logging.sentry_dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    if let Some(metrics_config) = &switchboard_config.metrics {
        install_statsd(metrics_config);
    }

    // Sentry needs to be initialized before the async runtime starts
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("build tokio runtime");

    runtime.block_on(run(switchboard_config));
}

async fn run(switchboard_config: Config) {
    let dispatcher = RateLimitedDispatcher::new(
        switchboard_config.dispatcher.max_in_flight,
        Duration::from_millis(switchboard_config.dispatcher.min_interval_ms),
    );
    let directory_client = DirectoryClient::new(dispatcher.clone(), &switchboard_config.directory.url);
    let resolver = DomainResolver::new(
        directory_client,
        Duration::from_secs(switchboard_config.directory.cache_ttl_secs),
    );
    let request_gateway = RequestGateway::new(resolver.clone(), dispatcher);

    let ops_addr = format!(
        "{}:{}",
        switchboard_config.listener.host, switchboard_config.listener.port
    );
    let admin_addr = format!(
        "{}:{}",
        switchboard_config.admin_listener.host, switchboard_config.admin_listener.port
    );
    tracing::info!(ops = %ops_addr, admin = %admin_addr, "switchboard starting");

    let ops_task = ops::serve_ops(&switchboard_config.listener, resolver, request_gateway);
    let admin_task = ops::serve_admin(&switchboard_config.admin_listener);

    if let Err(err) = tokio::try_join!(ops_task, admin_task) {
        tracing::error!("server error: {err}");
        std::process::exit(1);
    }
}

fn install_statsd(metrics_config: &MetricsConfig) {
    let recorder = match StatsdBuilder::from(metrics_config.statsd_host.as_str(), metrics_config.statsd_port)
        .build(Some("switchboard"))
    {
        Ok(recorder) => recorder,
        Err(err) => {
            tracing::warn!("could not build statsd recorder: {err}");
            return;
        }
    };

    if let Err(err) = metrics::set_global_recorder(recorder) {
        tracing::warn!("could not install statsd recorder: {err}");
        return;
    }

    describe_metrics();
}

fn describe_metrics() {
    let all = shared::metrics_defs::ALL_METRICS
        .iter()
        .chain(domains::metrics_defs::ALL_METRICS)
        .chain(gateway::metrics_defs::ALL_METRICS);

    for def in all {
        match def.metric_type {
            MetricType::Counter => metrics::describe_counter!(def.name, def.description),
            MetricType::Gauge => metrics::describe_gauge!(def.name, def.description),
            MetricType::Histogram => metrics::describe_histogram!(def.name, def.description),
        }
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context as _, Result};
use aws_config::{BehaviorVersion, Region};
use axum::{http::StatusCode, routing::get, Router};
use clap::Parser;
use futures::StreamExt;
use hostzone::{
    config::{OperatorConfig, ProviderKind},
    constants::{
        ERROR_REQUEUE_DURATION_SECS, HEALTH_SERVER_PATH, KIND_DNS_ZONE, METRICS_SERVER_PATH,
        TOKIO_WORKER_THREADS,
    },
    context::Context,
    crd::DNSZone,
    dns_errors::ZoneError,
    metrics::{gather_metrics, record_reconciliation, record_reconciliation_error},
    reconcilers::{
        error_requeue_after, reconcile_dnszone, KubeZoneStore, ReconcileOutcome,
    },
    route53::{InMemoryProvider, Route53Provider, ZoneManager, ZoneProvider},
};
use kube::{
    runtime::{controller::Action, watcher::Config, Controller},
    Api, Client, ResourceExt,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
enum ReconcileError {
    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error("reconciliation of {resource} timed out after {timeout:?}")]
    Timeout { resource: String, timeout: Duration },
}

impl ReconcileError {
    fn reason(&self) -> &'static str {
        match self {
            Self::Zone(e) => e.status_reason(),
            Self::Timeout { .. } => "Timeout",
        }
    }
}

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("hostzone-controller")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let config = OperatorConfig::parse();

    initialize_logging();

    info!("Starting hosted zone controller");
    debug!(?config, "Loaded configuration");

    debug!("Initializing Kubernetes client");
    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    debug!("Kubernetes client initialized successfully");

    let provider = build_provider(&config).await;
    let ctx = Arc::new(Context::new(
        Arc::new(KubeZoneStore::new(client.clone())),
        ZoneManager::new(provider),
        config.reconcile_timeout(),
    ));

    let metrics_addr = config.metrics_addr();
    let metrics_server = tokio::spawn(async move {
        if let Err(e) = run_metrics_server(metrics_addr).await {
            error!("Metrics server failed: {:#}", e);
        }
    });

    // Returns once SIGINT/SIGTERM has drained in-flight reconciliations
    run_dnszone_controller(client, config.watch_namespace.clone(), ctx).await?;
    info!("DNSZone controller stopped");

    metrics_server.await?;
    info!("Shutdown complete");
    Ok(())
}

/// Initialize logging.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT` (`json` or `text`).
fn initialize_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

async fn build_provider(config: &OperatorConfig) -> Arc<dyn ZoneProvider> {
    match config.provider {
        ProviderKind::Route53 => {
            info!("Using Route 53 in region {}", config.aws_region);
            let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(config.aws_region.clone()))
                .load()
                .await;
            Arc::new(Route53Provider::from_sdk_config(
                &sdk_config,
                config.route53_endpoint_url.as_deref(),
                config.private_zone_vpc(),
            ))
        }
        ProviderKind::Memory => {
            warn!("Using the in-memory DNS provider; hosted zones are lost on restart");
            Arc::new(InMemoryProvider::new())
        }
    }
}

/// Run the `DNSZone` controller until SIGINT or SIGTERM
async fn run_dnszone_controller(
    client: Client,
    watch_namespace: Option<String>,
    ctx: Arc<Context>,
) -> Result<()> {
    let api = match watch_namespace.as_deref() {
        Some(namespace) => {
            info!("Starting DNSZone controller in namespace {}", namespace);
            Api::<DNSZone>::namespaced(client, namespace)
        }
        None => {
            info!("Starting DNSZone controller for all namespaces");
            Api::<DNSZone>::all(client)
        }
    };

    Controller::new(api, Config::default())
        .shutdown_on_signal()
        .run(reconcile_dnszone_wrapper, error_policy, ctx)
        .for_each(|result| {
            if let Err(e) = result {
                debug!("Controller event: {}", e);
            }
            futures::future::ready(())
        })
        .await;

    Ok(())
}

/// Reconcile wrapper for `DNSZone`
async fn reconcile_dnszone_wrapper(
    dnszone: Arc<DNSZone>,
    ctx: Arc<Context>,
) -> Result<Action, ReconcileError> {
    let namespace = dnszone.namespace().unwrap_or_default();
    let name = dnszone.name_any();
    let start = Instant::now();

    let result = tokio::time::timeout(
        ctx.reconcile_timeout,
        reconcile_dnszone(&ctx, &namespace, &name),
    )
    .await;

    match result {
        Ok(Ok(outcome)) => {
            record_reconciliation(KIND_DNS_ZONE, outcome.as_str(), start.elapsed());
            info!(
                "Successfully reconciled DNSZone {}/{}: {}",
                namespace, name, outcome
            );
            Ok(outcome_action(outcome))
        }
        Ok(Err(e)) => {
            record_reconciliation_error(KIND_DNS_ZONE, e.status_reason(), start.elapsed());
            error!("Failed to reconcile DNSZone {}/{}: {}", namespace, name, e);
            Err(e.into())
        }
        Err(_) => {
            let err = ReconcileError::Timeout {
                resource: format!("{namespace}/{name}"),
                timeout: ctx.reconcile_timeout,
            };
            record_reconciliation_error(KIND_DNS_ZONE, err.reason(), start.elapsed());
            error!("{}", err);
            Err(err)
        }
    }
}

fn outcome_action(outcome: ReconcileOutcome) -> Action {
    outcome
        .requeue_after()
        .map_or_else(Action::await_change, Action::requeue)
}

/// Error policy for the `DNSZone` controller
fn error_policy(_dnszone: Arc<DNSZone>, err: &ReconcileError, _ctx: Arc<Context>) -> Action {
    Action::requeue(error_requeue_delay(err))
}

fn error_requeue_delay(err: &ReconcileError) -> Duration {
    match err {
        ReconcileError::Zone(e) => error_requeue_after(e),
        ReconcileError::Timeout { .. } => Duration::from_secs(ERROR_REQUEUE_DURATION_SECS),
    }
}

/// Serve `/metrics` and `/healthz` until a shutdown signal arrives
async fn run_metrics_server(addr: SocketAddr) -> Result<()> {
    let app = Router::new()
        .route(METRICS_SERVER_PATH, get(metrics_handler))
        .route(HEALTH_SERVER_PATH, get(health_check));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind metrics server to {addr}"))?;
    info!("Metrics server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics_handler() -> (StatusCode, String) {
    match gather_metrics() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => {
            error!("Failed to gather metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Resolve on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

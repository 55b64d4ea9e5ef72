//! QuantumViz server binary.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tokio::sync::Notify;
use tracing::{info, warn};

use qviz_adapter_braket::BraketBackend;
use qviz_explain::{CompletionOptions, Explainer, GeminiClient};
use qviz_server::telemetry::bump_level;
use qviz_server::{AppState, Config, create_router, init_tracing};
use qviz_viz::S3ArtifactStore;

#[derive(Debug, Parser)]
#[command(name = "qviz-server", version, about = "QuantumViz HTTP API server")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "QVIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overriding the configuration
    #[arg(long)]
    bind: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(bind) = cli.bind {
        config.server.address = bind;
    }
    config.logging.level = bump_level(&config.logging.level, cli.verbose).to_string();
    let addr = config.bind_address()?;

    init_tracing(&config.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting QuantumViz server");

    if config.server.api_key.is_some() {
        info!("API key authentication enabled");
    } else {
        warn!("No API key configured (QVIZ_API_KEY); POST routes are unauthenticated");
    }

    let state = build_state(config).await?;
    let app = create_router(Arc::new(state));

    let shutdown = Arc::new(Notify::new());
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.notify_one();
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("QuantumViz listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.notified().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("QuantumViz server shut down");
    Ok(())
}

/// Wire up backends, the explanation model and the artifact store.
async fn build_state(config: Config) -> anyhow::Result<AppState> {
    let explainer = if config.explanation_model_enabled() {
        let llm = &config.explanation;
        let api_key = llm.api_key.clone().unwrap_or_default();
        let mut client = GeminiClient::new(api_key, Duration::from_secs(llm.timeout_seconds))
            .context("building explanation client")?
            .with_model(llm.model.clone());
        if let Some(url) = &llm.base_url {
            client = client.with_base_url(url.clone());
        }
        info!(model = %llm.model, "explanation model configured");
        Explainer::with_model(Arc::new(client)).with_options(CompletionOptions {
            max_output_tokens: llm.max_output_tokens,
            temperature: llm.temperature,
        })
    } else {
        warn!("No explanation model configured; serving fallback explanations");
        Explainer::offline()
    };

    let mut state = AppState::new(config.clone()).with_explainer(explainer);

    if config.visualization.store == "s3" {
        let viz = &config.visualization;
        let store = S3ArtifactStore::connect(viz.bucket.clone(), viz.region.clone())
            .await
            .context("connecting artifact store")?;
        info!(bucket = %viz.bucket, region = %viz.region, "storing visualizations in S3");
        state = state.with_artifact_store(Arc::new(store));
    }

    if config.braket.enabled {
        let backend = BraketBackend::connect(config.braket.connection.clone())
            .await
            .context("connecting to AWS Braket")?;
        info!(device = backend.device_arn(), "registered braket backend");
        state.register_backend(Arc::new(backend)).await;
    }

    Ok(state)
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }
}

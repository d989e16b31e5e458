use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use codegate_core::tracing::init_tracing;
use codegate_forward_auth::config::GateConfig;
use codegate_forward_auth::infra::notifier::AnyNotifier;
use codegate_forward_auth::infra::store::MemoryStore;
use codegate_forward_auth::infra::sweeper::spawn_sweeper;
use codegate_forward_auth::router::build_router;
use codegate_forward_auth::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = GateConfig::from_env();
    config.log_warnings();

    let store = MemoryStore::new();
    let notifier = AnyNotifier::from_config(&config).context("failed to build HTTP client")?;
    info!(channel = notifier.channel(), "notification channel selected");

    let sweeper = spawn_sweeper(store.clone(), config.sweep_interval);

    let state = AppState {
        store,
        notifier: Arc::new(notifier),
        policy: config.policy(),
        session_cookie: Arc::new(config.session_cookie()),
        auth_prefix: Arc::from(config.auth_path_prefix.as_str()),
    };

    let router = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, prefix = %config.auth_path_prefix, "forward-auth listening");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    sweeper.abort();
    info!("forward-auth stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}

use reading_plan::countdown::{CountdownTimer, default_target};
use reading_plan::storage::FileStore;
use reading_plan::sync::watch_storage;
use reading_plan::{AppConfig, AppState, ProgressStore, load_plan, router};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    let clock = config.clock();

    let plan = load_plan(config.plan_path.as_deref(), config.plan_start).await?;

    if let Err(err) = fs::create_dir_all(&config.data_dir).await {
        warn!("cannot create {}, progress may not be saved: {err}", config.data_dir.display());
    }
    let progress = ProgressStore::load(FileStore::new(&config.data_dir)).await;
    info!("{} days already completed", progress.completed_count());

    let target = config.countdown_target.unwrap_or_else(|| default_target(&plan));
    let countdown = CountdownTimer::start(target, clock);
    info!("counting down to {}", target.to_rfc3339());

    let state = AppState::new(plan, progress, countdown, clock);
    let _watcher = config
        .storage_poll
        .map(|period| watch_storage(Arc::clone(&state.progress), period));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    // Dropping the state on exit also stops the countdown and watcher tasks.
    tokio::select! {
        result = axum::serve(listener, router(state)).into_future() => result?,
        _ = shutdown_signal() => info!("shutting down"),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
}

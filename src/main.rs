use task_flow::{router, AppState, Config, Ledger};
use tokio::{fs, net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let ledger = Ledger::load(&config.data_path).await;
    let state = AppState::new(ledger, config.streak_anchor);
    let app = router(state.clone());

    let addr = config.socket_addr();
    info!(
        data_path = %config.data_path.display(),
        streak_anchor = %config.streak_anchor,
        "listening on http://{addr}"
    );
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let ledger = state.ledger.lock().await;
    if !ledger.is_writable() {
        warn!("data file was never read, leaving it untouched");
        return Ok(());
    }
    match ledger.save().await {
        Ok(()) => info!("ledger saved, shutting down"),
        Err(err) => error!("final save failed: {}", err.message),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use fms_backend::config::{database::DatabaseConfig, environment::EnvironmentConfig};
use fms_backend::database::DatabaseConnection;
use fms_backend::repositories::{InMemoryTruckRepository, PgTruckRepository, TruckRepository};
use fms_backend::routes::create_app;
use fms_backend::services::AuthService;
use fms_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar .env si existe
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 Fleet Management API ({})", config.environment);
    if config.is_development() {
        warn!("⚠️ Development mode: default JWT secret and users may be active");
    }

    let trucks: Arc<dyn TruckRepository> = match &config.database_url {
        Some(url) => {
            let connection = DatabaseConnection::new(&DatabaseConfig::new(url.as_str())).await?;
            Arc::new(PgTruckRepository::new(connection.pool().clone()))
        }
        None => {
            warn!("⚠️ DATABASE_URL not set, trucks are kept in memory only");
            Arc::new(InMemoryTruckRepository::new())
        }
    };

    let auth = AuthService::from_config(&config)?;
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    let app = create_app(AppState::new(trucks, auth, config));

    info!("🌐 Server listening on http://{}", addr);
    info!("   GET    /health");
    info!("   POST   /auth/login");
    info!("   GET    /trucks");
    info!("   GET    /trucks/:id");
    info!("   POST   /trucks        (auth)");
    info!("   PUT    /trucks/:id    (auth)");
    info!("   DELETE /trucks/:id    (auth)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

/// Termina con Ctrl+C o SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}

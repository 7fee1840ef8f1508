//! Doable API server binary.

use clap::Parser;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "doable_server", about = "Doable todo API server")]
struct Args {
    /// Address to bind (host:port).
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind_addr: String,

    /// SQLite connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:doable.db?mode=rwc")]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = doable_core::db::DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,doable_api=debug,doable_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let pool = doable_core::db::connect(&args.database_url, args.max_connections).await?;

    info!("running database migrations");
    doable_api::migrate(&pool).await?;

    let config = doable_api::config::ApiConfig {
        bind_addr: args.bind_addr,
        database_url: args.database_url,
        jwt_secret: doable_core::auth::jwt::resolve_jwt_secret(),
    };

    let state = doable_api::AppState {
        pool,
        config: config.clone(),
    };

    let app = doable_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}

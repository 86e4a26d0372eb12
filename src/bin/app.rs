use adapter::{
    database::connect_database_with, redis::RedisClient,
    repository::session::SessionRepositoryImpl,
};
use anyhow::{Context, Result};
use api::route::site;
use axum::Router;
use kernel::seed::seed_defaults;
use registry::AppRegistry;
use shared::config::AppConfig;
use shared::env::{which, Environment};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await.inspect_err(|e| {
        tracing::error!(
            error.cause_chain = ?e, error.message = %e, "Fatal error; shutting down"
        )
    })
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;

    // スキーマ作成と初期データ投入に失敗した場合は起動しない
    let pool = connect_database_with(&app_config.database)
        .context("Failed to configure the database connection")?;
    pool.migrate()
        .await
        .context("Failed to create the database schema")?;

    let kv = Arc::new(RedisClient::new(&app_config.redis)?);
    kv.try_connect()
        .await
        .context("Failed to connect to the session store")?;
    let session_repository = Arc::new(SessionRepositoryImpl::new(kv, app_config.auth.ttl));
    let addr = SocketAddr::new(app_config.server.host, app_config.server.port);

    let registry = AppRegistry::new(pool, session_repository, app_config);

    let report = seed_defaults(
        registry.account_repository().as_ref(),
        registry.event_repository().as_ref(),
    )
    .await
    .context("Failed to seed default accounts and events")?;
    tracing::info!(
        accounts_created = report.accounts_created,
        events_created = report.events_created,
        "Seed data is in place"
    );

    let app = Router::new()
        .merge(site::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
}

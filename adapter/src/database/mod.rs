use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;

pub mod model;

fn make_sqlite_connect_options(cfg: &DatabaseConfig) -> AppResult<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(&cfg.url)
        .map_err(AppError::StoreUnavailable)?
        .create_if_missing(true)
        .foreign_keys(true);
    Ok(options)
}

#[derive(Clone)]
pub struct ConnectionPool(SqlitePool);

impl ConnectionPool {
    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &SqlitePool {
        &self.0
    }

    pub async fn begin(&self) -> AppResult<sqlx::Transaction<'_, sqlx::Sqlite>> {
        self.0.begin().await.map_err(AppError::TransactionError)
    }

    // スキーマを作成する。起動時に一度だけ呼ぶ
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.0).await?;
        tracing::debug!("database schema is up to date");
        Ok(())
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> AppResult<ConnectionPool> {
    let mut pool_options = SqlitePoolOptions::new().max_connections(cfg.max_connections);
    // インメモリ DB は接続が閉じると消えるため、接続を使い回し続ける
    if cfg.url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }
    Ok(ConnectionPool(
        pool_options.connect_lazy_with(make_sqlite_connect_options(cfg)?),
    ))
}

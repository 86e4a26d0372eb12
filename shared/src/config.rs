use anyhow::{bail, Context, Result};
use rand::RngCore;
use std::{env, str::FromStr};

// Cookie の署名鍵に必要なバイト長
pub const SESSION_SECRET_LEN: usize = 64;

const DEFAULT_TOKEN_TTL: u64 = 60 * 60 * 24 * 365;

// 起動時に一度だけ環境変数から読み込み、以後は変更しない
#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://event_manager.db".into()),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
        };
        let redis = RedisConfig {
            host: env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".into()),
            port: parse_or("REDIS_PORT", 6379)?,
        };
        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret) => {
                if secret.len() < SESSION_SECRET_LEN {
                    bail!("SESSION_SECRET must be at least {SESSION_SECRET_LEN} bytes long");
                }
                secret.into_bytes()
            }
            Err(_) => {
                tracing::warn!(
                    "SESSION_SECRET is not set; sessions will not survive a restart of this process"
                );
                AuthConfig::random_secret()
            }
        };
        let auth = AuthConfig {
            ttl: parse_or("AUTH_TOKEN_TTL", DEFAULT_TOKEN_TTL)?,
            password_hash_cost: parse_or("AUTH_PASSWORD_HASH_COST", bcrypt::DEFAULT_COST)?,
            session_secret,
        };
        let server = ServerConfig {
            host: parse_or("HOST", [127, 0, 0, 1].into())?,
            port: parse_or("PORT", 8080)?,
        };
        Ok(Self {
            database,
            redis,
            auth,
            server,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) => v.parse().with_context(|| format!("invalid value for {key}: {v}")),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AuthConfig {
    // セッションの有効期間（秒）
    pub ttl: u64,
    pub password_hash_cost: u32,
    pub session_secret: Vec<u8>,
}

impl AuthConfig {
    pub fn random_secret() -> Vec<u8> {
        let mut secret = vec![0u8; SESSION_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut secret);
        secret
    }
}

#[derive(Clone)]
pub struct ServerConfig {
    pub host: std::net::IpAddr,
    pub port: u16,
}

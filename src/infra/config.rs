//! Centralized configuration (environment variables + defaults).
//!
//! Binaries call `dotenv::dotenv().ok()` before reading anything here.

use anyhow::Context;
use std::env;
use std::net::SocketAddr;

/// Which `TriviaStore` implementation the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Postgres,
    Memory,
}

/// Database URL.
///
/// `DATABASE_URL` wins when set. Otherwise the URL is assembled from
/// `DB_HOST`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
pub fn database_url() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return url;
        }
    }
    let host = var_or("DB_HOST", "127.0.0.1:5432");
    let user = var_or("DB_USER", "postgres");
    let password = var_or("DB_PASSWORD", "postgres");
    let name = var_or("DB_NAME", "trivia");
    format!("postgres://{}:{}@{}/{}", user, password, host, name)
}

/// Storage backend (`postgres` by default, `memory` for throwaway runs).
pub fn storage_mode() -> anyhow::Result<StorageMode> {
    parse_storage_mode(&var_or("STORAGE_MODE", "postgres"))
}

/// Address the API server binds to.
pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    let raw = var_or("BIND_ADDR", "0.0.0.0:3000");
    raw.parse::<SocketAddr>()
        .with_context(|| format!("BIND_ADDR must be a socket address, got '{}'", raw))
}

/// Size of the Postgres connection pool.
pub fn db_max_connections() -> anyhow::Result<u32> {
    let raw = var_or("DB_MAX_CONNECTIONS", "5");
    let n = raw
        .parse::<u32>()
        .with_context(|| format!("DB_MAX_CONNECTIONS must be a valid u32, got '{}'", raw))?;
    Ok(n.max(1))
}

/// Whether an empty `categories` table gets the default categories on startup.
pub fn seed_categories() -> anyhow::Result<bool> {
    parse_flag("SEED_CATEGORIES", &var_or("SEED_CATEGORIES", "true"))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_storage_mode(raw: &str) -> anyhow::Result<StorageMode> {
    match raw.trim().to_lowercase().as_str() {
        "postgres" | "pg" => Ok(StorageMode::Postgres),
        "memory" | "in_memory" => Ok(StorageMode::Memory),
        other => Err(anyhow::anyhow!(
            "STORAGE_MODE must be 'postgres' or 'memory', got '{}'",
            other
        )),
    }
}

fn parse_flag(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(anyhow::anyhow!("{} must be true or false, got '{}'", key, other)),
    }
}

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Which persistence backend the stores write through.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Memory,
    File { data_dir: PathBuf },
    Redis { url: String },
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub storage_backend: StorageBackend,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            storage_backend: storage_backend_from_env()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn storage_backend_from_env() -> Result<StorageBackend> {
    let kind = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "file".to_string());
    parse_storage_backend(
        &kind,
        std::env::var("DATA_DIR").ok(),
        std::env::var("REDIS_URL").ok(),
    )
}

fn parse_storage_backend(
    kind: &str,
    data_dir: Option<String>,
    redis_url: Option<String>,
) -> Result<StorageBackend> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "memory" => Ok(StorageBackend::Memory),
        "file" => Ok(StorageBackend::File {
            data_dir: PathBuf::from(data_dir.unwrap_or_else(|| "./data".to_string())),
        }),
        "redis" => {
            let url = redis_url
                .context("REDIS_URL must be set when STORAGE_BACKEND=redis")?;
            Ok(StorageBackend::Redis { url })
        }
        other => bail!("Unknown STORAGE_BACKEND '{other}' (expected file, redis or memory)"),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

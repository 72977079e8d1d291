use std::env;

use crate::constants::{DEFAULT_BCRYPT_COST, DEFAULT_MAX_CONNECTIONS, DEFAULT_TOKEN_TTL_SECS};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub token_secret: String,
    pub bcrypt_cost: u32,
    pub token_ttl_secs: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = parse_var("SERVER_PORT", 8080)?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/fitness.db".to_string());
        let database_max_connections =
            parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let allowed_origins = split_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".to_string()),
        );

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let token_secret = env::var("TOKEN_SECRET")
            .map_err(|_| "TOKEN_SECRET must be set for token signing")?;
        let bcrypt_cost = parse_var("BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        let token_ttl_secs = parse_var("TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;

        Ok(Config {
            server_host,
            server_port,
            database_path,
            database_max_connections,
            allowed_origins,
            environment,
            token_secret,
            bcrypt_cost,
            token_ttl_secs,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| format!("Invalid {}", name)),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When unset the tracker keeps projects in memory.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let host: IpAddr = env_or("TRACKER_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid TRACKER_HOST: {e}"))?;

        let port: u16 = env_or("TRACKER_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid TRACKER_PORT: {e}"))?;

        let max_body_size: usize = env_or("TRACKER_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid TRACKER_MAX_BODY_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("TRACKER_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid TRACKER_DB_MAX_CONNECTIONS: {e}"))?;

        let log_level = env_or("TRACKER_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            max_body_size,
            db_max_connections,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

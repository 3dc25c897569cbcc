//! Environment-driven configuration

use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    /// Presence selects the SQLite backend; absence means in-memory.
    pub database_path: Option<String>,
    pub cache_disabled: bool,
    pub jwt_secret: String,
}

pub fn load_config() -> Config {
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let database_path = std::env::var("DATABASE_PATH")
        .ok()
        .filter(|p| !p.is_empty());

    let cache_disabled = std::env::var("CACHE_DISABLED")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        warn!("JWT_SECRET not set, using default (insecure for production)");
        "change-me-in-production".to_string()
    });

    Config {
        bind_address,
        database_path,
        cache_disabled,
        jwt_secret,
    }
}

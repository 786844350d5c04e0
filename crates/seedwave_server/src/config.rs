//! Server configuration from the environment.
//!
//! `.env` is loaded by `main` before this runs. The database settings live
//! in `seedwave_postgres::DatabaseConfig`.

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            run_migrations: true,
        }
    }
}

impl ServerConfig {
    /// `SEEDWAVE_BIND_ADDR`, `SEEDWAVE_RUN_MIGRATIONS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("SEEDWAVE_BIND_ADDR")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            run_migrations: lookup("SEEDWAVE_RUN_MIGRATIONS")
                .map(|v| parse_flag(&v, defaults.run_migrations))
                .unwrap_or(defaults.run_migrations),
        }
    }
}

/// Lenient boolean: unrecognised values fall back to `default`.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

use std::time::Duration;

use respkit_db::TxContext;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on a single transaction rollback, in seconds (default: `5`).
    pub rollback_timeout_secs: u64,
    /// Bearer token accepted by protected routes. Unset means every
    /// protected request is rejected.
    pub api_token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default   |
    /// |-------------------------|-----------|
    /// | `HOST`                  | `0.0.0.0` |
    /// | `PORT`                  | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`      |
    /// | `ROLLBACK_TIMEOUT_SECS` | `5`       |
    /// | `API_TOKEN`             | unset     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let rollback_timeout_secs: u64 = std::env::var("ROLLBACK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("ROLLBACK_TIMEOUT_SECS must be a valid u64");

        let api_token = std::env::var("API_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            host,
            port,
            request_timeout_secs,
            rollback_timeout_secs,
            api_token,
        }
    }

    /// Context handlers pass to the transactional response helpers.
    pub fn rollback_context(&self) -> TxContext {
        TxContext::background().with_timeout(Duration::from_secs(self.rollback_timeout_secs))
    }
}

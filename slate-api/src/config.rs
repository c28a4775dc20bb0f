//! API Configuration Module
//!
//! Configuration is loaded from environment variables with sensible
//! defaults for development.

/// API configuration for binding, CORS, and pagination caps.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host (default `0.0.0.0`).
    pub bind_host: String,

    /// Bind port (default 3000).
    pub bind_port: u16,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Default page size when the client omits `limit`.
    pub default_page_limit: i64,

    /// Upper bound on `limit`; larger requests are clamped.
    pub max_page_limit: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            bind_port: 3000,
            cors_origins: Vec::new(),
            default_page_limit: 10,
            max_page_limit: 100,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `SLATE_API_BIND`: bind host (default: 0.0.0.0)
    /// - `PORT` / `SLATE_API_PORT`: bind port (default: 3000)
    /// - `SLATE_CORS_ORIGINS`: comma-separated allowed origins (empty = allow all)
    /// - `SLATE_PAGE_LIMIT`: default page size (default: 10)
    /// - `SLATE_MAX_PAGE_LIMIT`: page size cap (default: 100)
    pub fn from_env() -> Self {
        let bind_host =
            std::env::var("SLATE_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());

        let bind_port = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("SLATE_API_PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let cors_origins = std::env::var("SLATE_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let default_page_limit = std::env::var("SLATE_PAGE_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let max_page_limit = std::env::var("SLATE_MAX_PAGE_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            bind_host,
            bind_port,
            cors_origins,
            default_page_limit,
            max_page_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_port, 3000);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.default_page_limit, 10);
        assert_eq!(config.max_page_limit, 100);
    }
}

use crate::auth::email_token::TokenConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the signing secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Externally reachable base URL, used to build email verification links
    /// (default: `http://localhost:8000`).
    pub public_base_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// HMAC-SHA256 secret used to sign session cookies.
    pub session_secret: String,
    /// Minimum interval between todo write requests per session, in seconds
    /// (default: `5`).
    pub rate_limit_interval_secs: u64,
    /// Email verification token configuration (secret, expiry).
    pub token: TokenConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Required | Default                 |
    /// |----------------------------|----------|-------------------------|
    /// | `HOST`                     | no       | `0.0.0.0`               |
    /// | `PORT`                     | no       | `8000`                  |
    /// | `PUBLIC_BASE_URL`          | no       | `http://localhost:8000` |
    /// | `REQUEST_TIMEOUT_SECS`     | no       | `30`                    |
    /// | `SECRET_KEY`               | **yes**  | --                      |
    /// | `RATE_LIMIT_INTERVAL_SECS` | no       | `5`                     |
    ///
    /// # Panics
    ///
    /// Panics if `SECRET_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_secret =
            std::env::var("SECRET_KEY").expect("SECRET_KEY must be set in the environment");
        assert!(!session_secret.is_empty(), "SECRET_KEY must not be empty");

        let rate_limit_interval_secs: u64 = std::env::var("RATE_LIMIT_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("RATE_LIMIT_INTERVAL_SECS must be a valid u64");

        let token = TokenConfig::from_env();

        Self {
            host,
            port,
            public_base_url,
            request_timeout_secs,
            session_secret,
            rate_limit_interval_secs,
            token,
        }
    }
}

use std::fmt;
use std::str::FromStr;

use hours_core::invariants::InvariantMode;

/// Environment name in which the mock identity resolver is refused.
pub const PRODUCTION_ENV: &str = "prod";

/// Errors raised while interpreting configuration values.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown AUTH_MODE '{0}' (expected 'mock' or 'azure')")]
    UnknownAuthMode(String),

    #[error("AUTH_MODE=mock is not allowed when APP_ENV={PRODUCTION_ENV}")]
    MockInProduction,

    #[error("{0} must be set when AUTH_MODE=azure")]
    MissingAzureSetting(&'static str),
}

/// How callers are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Identity taken from `X-Dev-User-*` headers. Development only.
    Mock,
    /// Azure AD bearer tokens verified against the tenant's signing keys.
    Azure,
}

impl FromStr for AuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "azure" => Ok(Self::Azure),
            other => Err(ConfigError::UnknownAuthMode(other.to_string())),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mock => "mock",
            Self::Azure => "azure",
        })
    }
}

/// Identity resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    Mock,
    Azure { tenant_id: String, client_id: String },
}

impl AuthConfig {
    /// Validate raw auth settings against the application environment.
    ///
    /// `mode` defaults to `azure`. Azure mode requires both the tenant id and
    /// the application client id; mock mode is rejected in production.
    pub fn resolve(
        app_env: &str,
        mode: Option<&str>,
        tenant_id: Option<String>,
        client_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mode = mode.map(str::parse).transpose()?.unwrap_or(AuthMode::Azure);

        match mode {
            AuthMode::Mock if app_env.eq_ignore_ascii_case(PRODUCTION_ENV) => {
                Err(ConfigError::MockInProduction)
            }
            AuthMode::Mock => Ok(Self::Mock),
            AuthMode::Azure => {
                let tenant_id = non_empty(tenant_id)
                    .ok_or(ConfigError::MissingAzureSetting("AZURE_TENANT_ID"))?;
                let client_id = non_empty(client_id)
                    .ok_or(ConfigError::MissingAzureSetting("AZURE_APP_CLIENT_ID"))?;
                Ok(Self::Azure {
                    tenant_id,
                    client_id,
                })
            }
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Mock => AuthMode::Mock,
            Self::Azure { .. } => AuthMode::Azure,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Server configuration loaded from environment variables.
///
/// All fields except the Azure settings have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Deployment environment name (default: `dev`).
    pub app_env: String,
    pub auth: AuthConfig,
    /// Enforcement of soft invariants (default: lenient).
    pub invariant_mode: InvariantMode,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `APP_ENV`              | `dev`                      |
    /// | `AUTH_MODE`            | `azure`                    |
    /// | `AZURE_TENANT_ID`      | required for `azure`       |
    /// | `AZURE_APP_CLIENT_ID`  | required for `azure`       |
    /// | `INVARIANT_MODE`       | `lenient`                  |
    ///
    /// # Panics
    ///
    /// Panics on any malformed or inconsistent value so misconfiguration
    /// fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".into());

        let auth = AuthConfig::resolve(
            &app_env,
            std::env::var("AUTH_MODE").ok().as_deref(),
            std::env::var("AZURE_TENANT_ID").ok(),
            std::env::var("AZURE_APP_CLIENT_ID").ok(),
        )
        .unwrap_or_else(|e| panic!("Invalid auth configuration: {e}"));

        let invariant_mode: InvariantMode = std::env::var("INVARIANT_MODE")
            .unwrap_or_else(|_| "lenient".into())
            .parse()
            .unwrap_or_else(|e| panic!("INVARIANT_MODE is invalid: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            app_env,
            auth,
            invariant_mode,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
    pub debate: DebateConfig,
}

/// Upstream chat-completion API configuration.
///
/// There is deliberately no API key here: every debate is authenticated
/// with the key the caller pasted into the request.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Route the debate handler is mounted on
    pub debate_path: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Outbound HTTP request configuration
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Per-call upstream timeout. `None` leaves calls unbounded.
    pub timeout_ms: Option<u64>,
}

/// Request gate configuration
#[derive(Debug, Clone)]
pub struct DebateConfig {
    /// Prefix every caller-supplied key must start with
    pub credential_prefix: String,
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_CREDENTIAL_PREFIX: &str = "sk-";
pub const DEFAULT_DEBATE_PATH: &str = "/api/debate";
/// Route of the liveness endpoint; the debate route may not shadow it
pub const HEALTH_PATH: &str = "/health";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let openai = OpenAiConfig {
            base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            temperature: env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TEMPERATURE),
        };

        let server = ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8888),
            debate_path: env::var("DEBATE_PATH")
                .unwrap_or_else(|_| DEFAULT_DEBATE_PATH.to_string()),
        };

        validate_debate_path(&server.debate_path)?;

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|ms| *ms > 0),
        };

        let debate = DebateConfig {
            credential_prefix: env::var("CREDENTIAL_PREFIX")
                .unwrap_or_else(|_| DEFAULT_CREDENTIAL_PREFIX.to_string()),
        };

        Ok(Config {
            openai,
            server,
            logging,
            request,
            debate,
        })
    }
}

/// Check that a debate route can be mounted next to the health route.
///
/// The route is matched literally, so capture (`:id`, `{id}`) and wildcard
/// (`*rest`) segments are refused rather than handed to the router.
pub fn validate_debate_path(path: &str) -> Result<(), AppError> {
    let reason = if !path.starts_with('/') {
        Some("must start with '/'")
    } else if path == HEALTH_PATH {
        Some("collides with the health route")
    } else if path.contains(['{', '}']) {
        Some("must not contain '{' or '}'")
    } else if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        Some("must not contain capture or wildcard segments")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(AppError::Config {
            message: format!("DEBATE_PATH {}: {}", reason, path),
        }),
        None => Ok(()),
    }
}

impl ServerConfig {
    /// Socket address to bind the listener to
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config {
                message: format!("Invalid bind address {}:{}: {}", self.host, self.port, e),
            })
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8888,
            debate_path: DEFAULT_DEBATE_PATH.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            credential_prefix: DEFAULT_CREDENTIAL_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.openai.base_url, "https://api.openai.com");
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert!((config.openai.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.debate.credential_prefix, "sk-");
        assert_eq!(config.server.debate_path, "/api/debate");
        assert!(config.request.timeout_ms.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..ServerConfig::default()
        };
        assert_eq!(server.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let server = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(server.socket_addr(), Err(AppError::Config { .. })));
    }

    #[test]
    fn test_validate_debate_path_accepts_literal_routes() {
        for path in [
            DEFAULT_DEBATE_PATH,
            "/.netlify/functions/smelter",
            "/debate",
            "/api/v1/debate-now",
        ] {
            assert!(validate_debate_path(path).is_ok(), "{} rejected", path);
        }
    }

    #[test]
    fn test_validate_debate_path_rejects_unmountable_routes() {
        for path in [
            "api/debate",
            "",
            HEALTH_PATH,
            "/api/{id}",
            "/api/{*rest}",
            "/api/:id",
            "/api/*rest",
            "/api/}",
        ] {
            assert!(
                matches!(validate_debate_path(path), Err(AppError::Config { .. })),
                "{} accepted",
                path
            );
        }
    }
}

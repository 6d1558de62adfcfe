// Configuration module entry point
// Layers defaults, an optional config.toml, HOLA_* variables and PORT

mod types;

use std::net::{IpAddr, SocketAddr};

pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig};

/// Port used when neither `PORT` nor `server.port` say otherwise
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable that overrides the listening port
pub const PORT_ENV: &str = "PORT";

impl Config {
    /// Load configuration from `config.toml` (optional) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("HOLA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.header_read_timeout", 0)?
            .set_default("performance.shutdown_grace", 5)?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.server.port = resolve_port(std::env::var(PORT_ENV).ok().as_deref(), cfg.server.port);
        Ok(cfg)
    }

    /// `server.host` must be an IP literal, IPv4 or IPv6
    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .server
            .host
            .trim()
            .parse()
            .map_err(|e| format!("Invalid host '{}': {e}", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

/// Resolve the listening port from the raw `PORT` value.
///
/// Unset, blank and unparsable values all fall back to `fallback`;
/// a bad value is never reported as an error.
pub fn resolve_port(raw: Option<&str>, fallback: u16) -> u16 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(fallback)
}

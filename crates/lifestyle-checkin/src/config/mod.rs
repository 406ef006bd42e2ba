use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::checkin::{CheckinSchedule, LATEST_UNLOCK_HOUR};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub checkin: CheckinConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let checkin = CheckinConfig {
            unlock_hour: env_clock_value("CHECKIN_UNLOCK_HOUR", 18, LATEST_UNLOCK_HOUR)?,
            reminder_hour: env_clock_value("CHECKIN_REMINDER_HOUR", 20, 23)?,
            reminder_minute: env_clock_value("CHECKIN_REMINDER_MINUTE", 0, 59)?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            checkin,
        })
    }
}

fn env_clock_value(key: &'static str, default: u32, max: u32) -> Result<u32, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value <= max)
        .ok_or(ConfigError::InvalidClockValue { key, max })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// When the daily check-in opens and when the reminder fires, in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinConfig {
    pub unlock_hour: u32,
    pub reminder_hour: u32,
    pub reminder_minute: u32,
}

impl CheckinConfig {
    pub fn schedule(&self) -> CheckinSchedule {
        CheckinSchedule {
            unlock_hour: self.unlock_hour,
            reminder_hour: self.reminder_hour,
            reminder_minute: self.reminder_minute,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{key} must be a whole number between 0 and {max}")]
    InvalidClockValue { key: &'static str, max: u32 },
}

use crate::models::Address;
use crate::services::countdown::{CountdownPolicy, DEFAULT_PAST_DUE_AFTER_SECS};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Ledger access configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub snapshot_path: PathBuf,
    pub user_address: Option<Address>,
    pub refresh_secs: u64,
}

/// Live countdown configuration
#[derive(Debug, Clone)]
pub struct CountdownConfig {
    pub tick_ms: u64,
    pub past_due_after_secs: u64,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ledger: LedgerConfig,
    pub countdown: CountdownConfig,
    pub log_level: String,
    pub log_format: String,
    pub environment: String,
}

impl LedgerConfig {
    /// Create ledger config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let snapshot_path = env::var("TANDA_SNAPSHOT_PATH")
            .map(PathBuf::from)
            .map_err(|_| "TANDA_SNAPSHOT_PATH environment variable is required")?;

        let user_address = match env::var("TANDA_USER_ADDRESS") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                Address::from_str(&raw).map_err(|e| format!("Invalid TANDA_USER_ADDRESS: {}", e))?,
            ),
            _ => None,
        };

        let refresh_secs = env::var("TANDA_REFRESH_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(12);

        if refresh_secs == 0 {
            return Err("TANDA_REFRESH_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            snapshot_path,
            user_address,
            refresh_secs,
        })
    }

    /// Get refresh interval as Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("tanda.json"),
            user_address: None,
            refresh_secs: 12,
        }
    }
}

impl CountdownConfig {
    /// Create countdown config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let tick_ms = env::var("COUNTDOWN_TICK_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1000);

        let past_due_after_secs = env::var("PAST_DUE_AFTER_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PAST_DUE_AFTER_SECS);

        if tick_ms == 0 {
            return Err("COUNTDOWN_TICK_MS must be greater than 0".to_string());
        }

        Ok(Self {
            tick_ms,
            past_due_after_secs,
        })
    }

    /// Get tick as Duration
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn policy(&self) -> CountdownPolicy {
        CountdownPolicy {
            past_due_after_secs: self.past_due_after_secs,
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            past_due_after_secs: DEFAULT_PAST_DUE_AFTER_SECS,
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let ledger = LedgerConfig::from_env()?;
        let countdown = CountdownConfig::from_env()?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        // Validate log format
        let valid_log_formats = ["text", "json"];
        if !valid_log_formats.contains(&log_format.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_FORMAT: {}. Must be one of: {:?}",
                log_format, valid_log_formats
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }

        Ok(Self {
            ledger,
            countdown,
            log_level: log_level.to_lowercase(),
            log_format: log_format.to_lowercase(),
            environment: environment.to_lowercase(),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            countdown: CountdownConfig::default(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            environment: "development".to_string(),
        }
    }
}

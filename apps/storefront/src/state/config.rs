//! # Storefront Configuration
//!
//! Loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                                │
//! │  2. TOML file: $FORPHONE_CONFIG, or ./forphone.toml if present          │
//! │  3. Environment variables                                               │
//! │     • FORPHONE_STORE_NAME    store_name                                 │
//! │     • FORPHONE_STORAGE_KEY   storage_key                                │
//! │     • FORPHONE_DATA_DIR      data_dir                                   │
//! │     • FORPHONE_TOAST_MS      toast_duration_ms                          │
//! │     • FORPHONE_EPHEMERAL     ephemeral (1/true/yes)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Config File
//! ```toml
//! # forphone.toml
//! store_name = "ForPhone"
//! storage_key = "forphoneCart"
//! data_dir = "/var/lib/forphone"
//! toast_duration_ms = 3000
//! currency_symbol = "$"
//! ```

use std::path::{Path, PathBuf};

use forphone_core::Money;
use forphone_storage::validate_key;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::cart_store::DEFAULT_CART_KEY;
use super::toast::DEFAULT_TOAST_MS;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "FORPHONE_CONFIG";

/// Config file looked for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "forphone.toml";

/// Longest toast display time accepted.
const MAX_TOAST_MS: u32 = 60_000;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Shown in the shell banner and on receipts.
    /// Default: "ForPhone"
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Slot the cart is saved under.
    /// Default: "forphoneCart"
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory for saved data. `None` uses the platform app data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// How long toasts stay visible.
    /// Default: 3000
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u32,

    /// Prefix for displayed amounts.
    /// Default: "$"
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Keep the cart in memory only; nothing is written to disk.
    #[serde(default)]
    pub ephemeral: bool,
}

fn default_store_name() -> String {
    "ForPhone".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

fn default_toast_duration_ms() -> u32 {
    DEFAULT_TOAST_MS
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            store_name: default_store_name(),
            storage_key: default_storage_key(),
            data_dir: None,
            toast_duration_ms: default_toast_duration_ms(),
            currency_symbol: default_currency_symbol(),
            ephemeral: false,
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment and defaults.
    ///
    /// An explicit `FORPHONE_CONFIG` path must exist; the implicit
    /// `./forphone.toml` is optional.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_with(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML; missing fields take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `FORPHONE_*` overrides using `lookup` to read variables.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store_name) = lookup("FORPHONE_STORE_NAME") {
            debug!(%store_name, "Overriding store name from environment");
            self.store_name = store_name;
        }

        if let Some(key) = lookup("FORPHONE_STORAGE_KEY") {
            debug!(%key, "Overriding storage key from environment");
            self.storage_key = key;
        }

        if let Some(dir) = lookup("FORPHONE_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(ms) = lookup("FORPHONE_TOAST_MS") {
            self.toast_duration_ms = ms.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "FORPHONE_TOAST_MS".to_string(),
                value: ms.clone(),
                reason: "expected milliseconds as a whole number".to_string(),
            })?;
        }

        if let Some(flag) = lookup("FORPHONE_EPHEMERAL") {
            self.ephemeral = match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "FORPHONE_EPHEMERAL".to_string(),
                        value: flag.clone(),
                        reason: "expected true or false".to_string(),
                    })
                }
            };
        }

        Ok(())
    }

    /// Checks values that parsed but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_key(&self.storage_key).map_err(|e| ConfigError::InvalidValue {
            field: "storage_key".to_string(),
            value: self.storage_key.clone(),
            reason: e.to_string(),
        })?;

        if self.toast_duration_ms == 0 || self.toast_duration_ms > MAX_TOAST_MS {
            return Err(ConfigError::InvalidValue {
                field: "toast_duration_ms".to_string(),
                value: self.toast_duration_ms.to_string(),
                reason: format!("must be between 1 and {MAX_TOAST_MS}"),
            });
        }

        Ok(())
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use forphone_core::Money;
    /// use forphone_storefront_lib::state::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(199_800)), "$1998.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.store_name, "ForPhone");
        assert_eq!(config.storage_key, "forphoneCart");
        assert_eq!(config.toast_duration_ms, 3000);
        assert_eq!(config.data_dir, None);
        assert!(!config.ephemeral);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            store_name = "ForPhone Outlet"
            toast_duration_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "ForPhone Outlet");
        assert_eq!(config.toast_duration_ms, 1500);
        assert_eq!(config.storage_key, "forphoneCart");
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = StorefrontConfig::from_toml_str("toast_duration_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StorefrontConfig::default();
        config
            .apply_env_with(env(&[
                ("FORPHONE_STORE_NAME", "Phone Barn"),
                ("FORPHONE_STORAGE_KEY", "cart_v2"),
                ("FORPHONE_DATA_DIR", "/tmp/forphone"),
                ("FORPHONE_TOAST_MS", "500"),
                ("FORPHONE_EPHEMERAL", "yes"),
            ]))
            .unwrap();

        assert_eq!(config.store_name, "Phone Barn");
        assert_eq!(config.storage_key, "cart_v2");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/forphone")));
        assert_eq!(config.toast_duration_ms, 500);
        assert!(config.ephemeral);
    }

    #[test]
    fn test_env_invalid_values() {
        let mut config = StorefrontConfig::default();
        let err = config
            .apply_env_with(env(&[("FORPHONE_TOAST_MS", "3s")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = config
            .apply_env_with(env(&[("FORPHONE_EPHEMERAL", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = StorefrontConfig {
            storage_key: "../cart".to_string(),
            ..StorefrontConfig::default()
        };
        assert!(config.validate().is_err());

        let config = StorefrontConfig {
            toast_duration_ms: 0,
            ..StorefrontConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("forphone.toml");
        std::fs::write(&path, "currency_symbol = \"US$\"\nephemeral = true\n").unwrap();

        let config = StorefrontConfig::from_file(&path).unwrap();
        assert_eq!(config.currency_symbol, "US$");
        assert!(config.ephemeral);

        let missing = StorefrontConfig::from_file(&temp_dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_major(3297)), "$3297.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");

        let config = StorefrontConfig {
            currency_symbol: "US$".to_string(),
            ..StorefrontConfig::default()
        };
        assert_eq!(config.format_currency(Money::from_major(999)), "US$999.00");
    }
}

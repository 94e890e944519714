//! TOML configuration file.

use std::{fs, path::Path, time::Duration};

use chrono_tz::Tz;
use http::Uri;
use serde::Deserialize;
use serde_with::{DisplayFromStr, DurationSeconds, serde_as};

use crate::{api::octopus, error::ConfigError, quantity::cost::Pence};

#[must_use]
#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub influxdb: InfluxDbConfig,

    #[serde(default)]
    pub octopus: OctopusConfig,

    #[serde(default)]
    pub electricity: ElectricityConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config: Self = toml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the required keys before anything goes over the network.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.octopus.api_key.is_empty() {
            return Err(ConfigError::Missing("octopus.api_key"));
        }
        if self.electricity.mpan.is_empty() {
            return Err(ConfigError::Missing("electricity.mpan"));
        }
        if self.electricity.serial_number.is_empty() {
            return Err(ConfigError::Missing("electricity.serial_number"));
        }
        if self.octopus.max_pages == 0 {
            return Err(ConfigError::NonPositive { key: "octopus.max_pages" });
        }
        Ok(())
    }
}

#[serde_as]
#[derive(Deserialize)]
#[serde(default)]
pub struct InfluxDbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,

    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(rename = "timeout_secs")]
    pub timeout: Duration,
}

impl Default for InfluxDbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8086,
            user: String::new(),
            password: String::new(),
            database: "energy".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[serde_as]
#[derive(Deserialize)]
#[serde(default)]
pub struct OctopusConfig {
    pub api_key: String,

    #[serde_as(as = "DisplayFromStr")]
    pub base_url: Uri,

    /// Pagination guard against a server which never stops returning the next page.
    pub max_pages: usize,

    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(rename = "timeout_secs")]
    pub timeout: Duration,
}

impl Default for OctopusConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Uri::from_static(octopus::DEFAULT_BASE_URL),
            max_pages: 100,
            timeout: Duration::from_secs(10),
        }
    }
}

#[serde_as]
#[derive(Deserialize)]
#[serde(default)]
pub struct ElectricityConfig {
    pub mpan: String,
    pub serial_number: String,

    /// Agile unit rates endpoint, rates are not fetched when unset.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub agile_rate_url: Option<Uri>,

    /// Daily standing charge.
    pub agile_standing_charge: Pence,

    /// Time zone of the date expressions and the `time_of_day` tag.
    pub timezone: Tz,
}

impl Default for ElectricityConfig {
    fn default() -> Self {
        Self {
            mpan: String::new(),
            serial_number: String::new(),
            agile_rate_url: None,
            agile_standing_charge: Pence::ZERO,
            timezone: Tz::UTC,
        }
    }
}

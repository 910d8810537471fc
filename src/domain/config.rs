use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::billing::{InvalidRate, Rates};

/// Configuration for the marina.
///
/// This struct holds settings that are not part of the inventory itself,
/// currently the monthly billing rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// Monthly charge per foot, by location category.
    rates: Rates,
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the TOML content is
    /// invalid, or if a rate is negative or not a finite number.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the monthly billing rates.
    #[must_use]
    pub const fn rates(&self) -> &Rates {
        &self.rates
    }
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// Monthly charge per foot. Missing rates fall back to the defaults.
        #[serde(default)]
        rates: Rates,
    },
}

impl TryFrom<Versions> for Config {
    type Error = InvalidRate;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 { rates } => {
                rates.validate()?;
                Ok(Self { rates })
            }
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            rates: config.rates,
        }
    }
}

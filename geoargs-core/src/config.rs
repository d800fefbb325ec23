//! Engine configuration: structural check toggles, the polyline bypass and
//! the projection and year tables.
//!
//! Configuration is fixed when an [`Engine`](crate::Engine) is built and
//! never mutated afterwards.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::year::{DEFAULT_SUPPORTED_YEARS, DEFAULT_YEAR};
use crate::{ConfigError, Epsg};

/// Settings shared by every normalizer an engine hands out.
///
/// Missing fields fall back to their defaults when deserialised.
///
/// # Examples
///
/// ```
/// use geoargs_core::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{"check_osm_key": false, "default_year": 2010}"#)?;
/// assert!(!config.check_osm_key);
/// assert_eq!(config.default_year, 2010);
/// assert_eq!(config.supported_years, [2006, 2010, 2013]);
/// # Ok::<(), geoargs_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Require `geometry.type == "Point"` when filtering features.
    pub check_type: bool,
    /// Require `properties.osm_key == "place"` when filtering features.
    pub check_osm_key: bool,
    /// Honour the `polyline` keyword by bypassing coordinate decoding.
    /// Enabled by default.
    pub polyline: bool,
    /// Accepted NUTS reference years.
    pub supported_years: Vec<u16>,
    /// Year used when the `year` keyword is absent.
    pub default_year: u16,
    /// Projection alias used when the `proj` keyword is absent.
    pub default_projection: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            check_type: true,
            check_osm_key: true,
            polyline: true,
            supported_years: DEFAULT_SUPPORTED_YEARS.to_vec(),
            default_year: DEFAULT_YEAR,
            default_projection: "WGS84".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()
    }

    /// Parse and validate a JSON configuration from `reader`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(reader).map_err(ConfigError::Parse)?;
        config.validate()
    }

    /// Check the configuration and return it unchanged.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the year allow-list is empty,
    /// the default year is not allow-listed, or the default projection is not
    /// a known alias.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.supported_years.is_empty() {
            return Err(ConfigError::Invalid(
                "supported_years must not be empty".to_owned(),
            ));
        }
        if !self.supported_years.contains(&self.default_year) {
            return Err(ConfigError::Invalid(format!(
                "default_year {} is not in supported_years",
                self.default_year
            )));
        }
        self.projection()?;
        Ok(self)
    }

    /// Resolve the default projection alias.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the alias is unknown.
    pub fn projection(&self) -> Result<Epsg, ConfigError> {
        Epsg::lookup_alias(&self.default_projection).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "default_projection '{}' is not a known projection alias",
                self.default_projection
            ))
        })
    }

    /// Set both structural checks of the geometry filter.
    #[must_use]
    pub const fn with_geometry_checks(mut self, check_type: bool, check_osm_key: bool) -> Self {
        self.check_type = check_type;
        self.check_osm_key = check_osm_key;
        self
    }

    /// Enable or disable the polyline bypass.
    #[must_use]
    pub const fn with_polyline(mut self, polyline: bool) -> Self {
        self.polyline = polyline;
        self
    }

    /// Replace the year allow-list and default.
    #[must_use]
    pub fn with_years(mut self, supported: impl Into<Vec<u16>>, default_year: u16) -> Self {
        self.supported_years = supported.into();
        self.default_year = default_year;
        self
    }

    /// Set the default projection alias.
    #[must_use]
    pub fn with_default_projection(mut self, alias: impl Into<String>) -> Self {
        self.default_projection = alias.into();
        self
    }
}

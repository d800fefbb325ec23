//! EPSG projection codes and their accepted aliases.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shape::is_blank;
use crate::{CallArgs, NormalizeError, Normalized, Normalizer};

/// Keyword holding a projection alias or EPSG code.
pub const KW_PROJ: &str = "proj";

/// A supported EPSG coordinate reference system code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Epsg(u32);

const ALIASES: [(&str, Epsg); 3] = [
    ("WGS84", Epsg::WGS84),
    ("EPSG3857", Epsg::WEB_MERCATOR),
    ("LAEA", Epsg::LAEA),
];

const CODES: [Epsg; 4] = [Epsg::WGS84, Epsg::ETRS89, Epsg::WEB_MERCATOR, Epsg::LAEA];

const GEOCODER_DEFAULTS: [(&str, Epsg); 4] = [
    ("gisco", Epsg::WGS84),
    ("GoogleV3", Epsg::WEB_MERCATOR),
    ("GMaps", Epsg::WEB_MERCATOR),
    ("GPlace", Epsg::WEB_MERCATOR),
];

impl Epsg {
    /// World Geodetic System 1984.
    pub const WGS84: Self = Self(4326);
    /// European Terrestrial Reference System 1989.
    pub const ETRS89: Self = Self(4258);
    /// Spherical (web) Mercator.
    pub const WEB_MERCATOR: Self = Self(3857);
    /// ETRS89 Lambert Azimuthal Equal-Area.
    pub const LAEA: Self = Self(3035);

    /// The numeric EPSG code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Look up a case-sensitive alias such as `WGS84` or `LAEA`.
    #[must_use]
    pub fn lookup_alias(alias: &str) -> Option<Self> {
        ALIASES
            .iter()
            .find(|(name, _)| *name == alias)
            .map(|(_, epsg)| *epsg)
    }

    /// Look up a raw EPSG code.
    #[must_use]
    pub fn lookup_code(code: u64) -> Option<Self> {
        CODES
            .iter()
            .copied()
            .find(|epsg| u64::from(epsg.code()) == code)
    }

    /// Look up a raw `proj` value: a string alias or an integer code.
    #[must_use]
    pub fn lookup(value: &Value) -> Option<Self> {
        match value {
            Value::String(alias) => Self::lookup_alias(alias),
            Value::Number(number) => number.as_u64().and_then(Self::lookup_code),
            _ => None,
        }
    }

    /// Every accepted string alias with its canonical code.
    pub fn aliases() -> impl Iterator<Item = (&'static str, Self)> {
        ALIASES.into_iter()
    }

    /// Default projection used by a named geocoder.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoargs_core::Epsg;
    ///
    /// assert_eq!(Epsg::for_geocoder("GMaps"), Some(Epsg::WEB_MERCATOR));
    /// assert_eq!(Epsg::for_geocoder("Nominatim"), None);
    /// ```
    #[must_use]
    pub fn for_geocoder(geocoder: &str) -> Option<Self> {
        GEOCODER_DEFAULTS
            .iter()
            .find(|(name, _)| *name == geocoder)
            .map(|(_, epsg)| *epsg)
    }
}

impl fmt::Display for Epsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Maps the optional `proj` keyword to a canonical [`Epsg`] code.
///
/// An absent keyword resolves to the configured default; a blank one
/// (`null` or `""`) yields `None`. The canonical code replaces the raw
/// `proj` value in the remaining arguments.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionNormalizer {
    default: Epsg,
}

impl Default for ProjectionNormalizer {
    fn default() -> Self {
        Self::new(Epsg::WGS84)
    }
}

impl ProjectionNormalizer {
    /// Build a normalizer falling back to `default` when `proj` is absent.
    #[must_use]
    pub const fn new(default: Epsg) -> Self {
        Self { default }
    }
}

impl Normalizer for ProjectionNormalizer {
    type Output = Option<Epsg>;

    fn normalize(&self, mut args: CallArgs) -> Result<Normalized<Option<Epsg>>, NormalizeError> {
        let projection = match args.take(KW_PROJ) {
            None => Some(self.default),
            Some(raw) if is_blank(&raw) => None,
            Some(raw) => Some(Epsg::lookup(&raw).ok_or_else(|| {
                NormalizeError::UnsupportedValue(format!("projection {raw} not supported"))
            })?),
        };
        if let Some(epsg) = projection {
            args.inject(KW_PROJ, Value::from(epsg.code()));
        }
        Ok(Normalized::new(projection, args))
    }

    fn recognized_keys(&self) -> Vec<&'static str> {
        vec![KW_PROJ]
    }
}

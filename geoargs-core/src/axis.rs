//! Coordinate pairs and their axis order.

use geo::Coord;
use serde::Serialize;
use serde_json::Value;

use crate::{NormalizeError, OneOrMany};

/// Keyword selecting the output axis order.
pub const KW_ORDER: &str = "order";

/// Axis order of a coordinate pair.
///
/// `lL` is latitude-first, `Ll` is longitude-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AxisOrder {
    /// `[lat, lon]`, flag `lL`.
    #[default]
    #[serde(rename = "lL")]
    LatLon,
    /// `[lon, lat]`, flag `Ll`.
    #[serde(rename = "Ll")]
    LonLat,
}

impl AxisOrder {
    /// The textual flag accepted by the `order` keyword.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::LatLon => "lL",
            Self::LonLat => "Ll",
        }
    }

    /// Parse an optional `order` keyword value; absence yields the default.
    ///
    /// # Errors
    /// Returns [`NormalizeError::InvalidOption`] for anything but the strings
    /// `lL` and `Ll`.
    pub fn from_option(value: Option<Value>) -> Result<Self, NormalizeError> {
        match value {
            None => Ok(Self::default()),
            Some(Value::String(flag)) => flag.parse(),
            Some(other) => Err(NormalizeError::InvalidOption(format!(
                "order must be 'lL' or 'Ll', got {other}"
            ))),
        }
    }
}

impl std::str::FromStr for AxisOrder {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lL" => Ok(Self::LatLon),
            "Ll" => Ok(Self::LonLat),
            _ => Err(NormalizeError::InvalidOption(format!(
                "order must be 'lL' or 'Ll', got '{s}'"
            ))),
        }
    }
}

impl std::fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.flag())
    }
}

/// A two-element coordinate pair; its meaning depends on an [`AxisOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoordPair(pub [f64; 2]);

impl CoordPair {
    /// Build a pair from its two components.
    #[must_use]
    pub const fn new(first: f64, second: f64) -> Self {
        Self([first, second])
    }

    /// First component.
    #[must_use]
    pub const fn first(self) -> f64 {
        self.0[0]
    }

    /// Second component.
    #[must_use]
    pub const fn second(self) -> f64 {
        self.0[1]
    }

    /// The pair with its components swapped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self([self.0[1], self.0[0]])
    }

    /// Convert to a `geo` coordinate (x = longitude, y = latitude).
    #[must_use]
    pub const fn to_geo(self, order: AxisOrder) -> Coord<f64> {
        match order {
            AxisOrder::LatLon => Coord {
                x: self.second(),
                y: self.first(),
            },
            AxisOrder::LonLat => Coord {
                x: self.first(),
                y: self.second(),
            },
        }
    }

    /// Build a pair in `order` from a `geo` coordinate.
    #[must_use]
    pub const fn from_geo(coord: Coord<f64>, order: AxisOrder) -> Self {
        match order {
            AxisOrder::LatLon => Self::new(coord.y, coord.x),
            AxisOrder::LonLat => Self::new(coord.x, coord.y),
        }
    }
}

/// An ordered list of coordinate pairs sharing one axis order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    /// Axis order of every pair.
    pub order: AxisOrder,
    /// The pairs; a single pair collapses to [`OneOrMany::One`].
    pub pairs: OneOrMany<CoordPair>,
}

impl Coordinates {
    /// Build from pairs already in `order`.
    #[must_use]
    pub fn new(order: AxisOrder, pairs: Vec<CoordPair>) -> Self {
        Self {
            order,
            pairs: OneOrMany::from_vec(pairs),
        }
    }

    /// Rewrite the pairs into `order`.
    #[must_use]
    pub fn reorder(self, order: AxisOrder) -> Self {
        if order == self.order {
            return self;
        }
        Self {
            order,
            pairs: self.pairs.map(CoordPair::reversed),
        }
    }

    /// Convert every pair to a `geo` coordinate.
    #[must_use]
    pub fn to_geo(&self) -> Vec<Coord<f64>> {
        self.pairs
            .iter()
            .map(|pair| pair.to_geo(self.order))
            .collect()
    }

    /// Number of pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// JSON rendering injected into keyword arguments: the bare pairs,
    /// without the axis order.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.pairs).unwrap_or_default()
    }
}

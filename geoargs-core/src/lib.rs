//! Argument normalization for geolocation service calls.
//!
//! Service methods accept deliberately permissive call shapes: positional
//! strings or pairs, keyword aliases, nested mappings and GeoJSON-like
//! features. Each [`Normalizer`] reduces one family of such inputs to a
//! single canonical value, reports a categorised [`NormalizeError`]
//! otherwise, and passes every keyword it does not recognise through
//! untouched.
//!
//! # Examples
//!
//! ```
//! use geoargs_core::{CallArgs, Engine, Normalizer, OneOrMany};
//! use serde_json::json;
//!
//! let engine = Engine::default();
//! let args = CallArgs::new()
//!     .kwarg("city", json!(["Athens", "Heraklion"]))
//!     .kwarg("country", "Hellas")
//!     .kwarg("timeout", 10);
//! let normalized = engine.place().normalize(args)?;
//! assert_eq!(normalized.value.len(), 2);
//! assert_eq!(normalized.remaining.keywords.get("timeout"), Some(&json!(10)));
//! # Ok::<(), geoargs_core::NormalizeError>(())
//! ```

#![forbid(unsafe_code)]

mod args;
mod axis;
mod config;
mod coordinate;
mod engine;
mod error;
mod file;
mod geometry;
mod location;
mod normalizer;
mod nuts;
mod place;
mod projection;
pub mod shape;
mod year;

pub use args::{CallArgs, OneOrMany};
pub use axis::{AxisOrder, CoordPair, Coordinates, KW_ORDER};
pub use config::EngineConfig;
pub use coordinate::{
    CoordinateNormalizer, KW_COORD, KW_LAT, KW_LON, KW_POLYLINE, KW_X, KW_Y,
};
pub use engine::Engine;
pub use error::{ConfigError, ErrorKind, NormalizeError};
pub use file::{FileNormalizer, KW_BASE, KW_DIR, KW_FILE, PathResolver, ResolvedPath};
pub use geometry::{GeometryNormalizer, KW_UNIQUE};
pub use location::{Location, LocationNormalizer};
pub use normalizer::{Chain, Normalized, Normalizer};
pub use nuts::{
    KW_ATTRIBUTES, KW_DISPLAY_FIELD_NAME, KW_LAYER_ID, KW_LAYER_NAME, KW_LEVEL, KW_NUTS,
    KW_VALUE, NutsNormalizer, NutsRecord,
};
pub use place::{
    KW_ADDRESS, KW_CITY, KW_COUNTRY, KW_PLACE, KW_ZIP, PlaceList, PlaceNormalizer,
    broadcast_join,
};
pub use projection::{Epsg, KW_PROJ, ProjectionNormalizer};
pub use year::{DEFAULT_SUPPORTED_YEARS, DEFAULT_YEAR, KW_YEAR, NutsYear, YearNormalizer};

//! Extraction of point coordinates from GeoJSON-like place features.
//!
//! Features are stored longitude-first, following the GeoJSON convention.
//! Unlike place and coordinate normalization, finding no usable feature is
//! not an error: the result is simply an empty coordinate list. Call sites
//! rely on this lossy tolerance.

use serde_json::Value;

use crate::axis::KW_ORDER;
use crate::coordinate::KW_COORD;
use crate::shape::{ShapeMatcher, all_mappings, find_shape, into_single_sequence, mapping_sequence};
use crate::{AxisOrder, CallArgs, CoordPair, Coordinates, NormalizeError, Normalized, Normalizer};

/// Keyword collapsing the result to its first coordinate pair.
pub const KW_UNIQUE: &str = "unique";

const GEOMETRY_KEYS: [&str; 3] = [KW_COORD, KW_UNIQUE, KW_ORDER];

const FEATURE: &str = "Feature";
const FEATURE_COLLECTION: &str = "FeatureCollection";
const POINT: &str = "Point";
const PLACE_OSM_KEY: &str = "place";

const GEOMETRY_SHAPES: [ShapeMatcher<Vec<Value>>; 2] = [
    ShapeMatcher::new("positional features", all_mappings, Ok),
    ShapeMatcher::new("positional feature sequence", mapping_sequence, into_single_sequence),
];

/// Flatten a `coord` keyword into candidate features.
fn collection_members(value: Value) -> Result<Vec<Value>, NormalizeError> {
    match value {
        Value::Object(mut map) => {
            let is_collection = map.get("type").and_then(Value::as_str) == Some(FEATURE_COLLECTION);
            match map.remove("features") {
                Some(Value::Array(features)) if is_collection => Ok(features),
                Some(_) if is_collection => Err(NormalizeError::malformed(
                    "a FeatureCollection must carry a 'features' array",
                )),
                Some(features) => {
                    map.insert("features".to_owned(), features);
                    Ok(vec![Value::Object(map)])
                }
                None => Ok(vec![Value::Object(map)]),
            }
        }
        Value::Array(items) => Ok(items),
        other => Err(NormalizeError::malformed(format!(
            "geometry input must be a feature or a list of features, got {other}"
        ))),
    }
}

/// Longitude-first coordinates of a point feature, if well formed.
fn point_coordinates(feature: &Value) -> Option<CoordPair> {
    let coordinates = feature.pointer("/geometry/coordinates")?.as_array()?;
    match coordinates.as_slice() {
        [lon, lat, ..] => Some(CoordPair::new(lon.as_f64()?, lat.as_f64()?)),
        _ => None,
    }
}

/// Filters feature collections down to point places and extracts their
/// coordinates.
///
/// A feature survives when its `type` is `Feature`, it carries `geometry`
/// and `properties`, its geometry type is `Point` (when type checking is
/// enabled) and its `properties.osm_key` is `place` (when the OSM key check
/// is enabled). Survivors without a numeric coordinate pair are dropped.
///
/// Positional shapes, in priority order: every positional argument a
/// mapping, then one positional sequence of mappings. Other positional
/// arguments are left untouched for the wrapped operation.
///
/// # Examples
///
/// ```
/// use geoargs_core::{CallArgs, CoordPair, Engine, Normalizer, OneOrMany};
/// use serde_json::json;
///
/// let feature = json!({
///     "type": "Feature",
///     "geometry": {"type": "Point", "coordinates": [13.3888599, 52.5170365]},
///     "properties": {"osm_key": "place", "name": "Berlin"}
/// });
/// let coords = Engine::default().geometry().normalize(CallArgs::new().arg(feature))?.value;
/// assert_eq!(coords.pairs, OneOrMany::One(CoordPair::new(52.5170365, 13.3888599)));
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeometryNormalizer {
    check_type: bool,
    check_osm_key: bool,
}

impl Default for GeometryNormalizer {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl GeometryNormalizer {
    /// Build a normalizer with the given structural checks.
    #[must_use]
    pub const fn new(check_type: bool, check_osm_key: bool) -> Self {
        Self {
            check_type,
            check_osm_key,
        }
    }

    /// Whether `feature` passes the structural and semantic filters.
    #[must_use]
    pub fn accepts(&self, feature: &Value) -> bool {
        let Some(map) = feature.as_object() else {
            return false;
        };
        map.get("type").and_then(Value::as_str) == Some(FEATURE)
            && map.contains_key("geometry")
            && map.contains_key("properties")
            && (!self.check_type
                || feature.pointer("/geometry/type").and_then(Value::as_str) == Some(POINT))
            && (!self.check_osm_key
                || feature.pointer("/properties/osm_key").and_then(Value::as_str)
                    == Some(PLACE_OSM_KEY))
    }

    fn take_features(args: &mut CallArgs) -> Result<Vec<Value>, NormalizeError> {
        if args.has_positional() {
            match find_shape(&GEOMETRY_SHAPES, &args.positional) {
                Some(_) if args.contains_any(&[KW_COORD]) => {
                    return Err(NormalizeError::ambiguous(
                        "positional features cannot be combined with the coord keyword",
                    ));
                }
                Some(matcher) => {
                    log::debug!("geometry arguments matched shape '{}'", matcher.name());
                    return matcher.extract(args.take_positional());
                }
                None => {
                    log::debug!("positional arguments are not features; leaving them untouched");
                }
            }
        }
        args.take_present(KW_COORD)
            .map_or_else(|| Ok(Vec::new()), collection_members)
    }
}

impl Normalizer for GeometryNormalizer {
    type Output = Coordinates;

    fn normalize(&self, mut args: CallArgs) -> Result<Normalized<Coordinates>, NormalizeError> {
        let unique = match args.take(KW_UNIQUE) {
            None => false,
            Some(Value::Bool(flag)) => flag,
            Some(other) => {
                return Err(NormalizeError::InvalidOption(format!(
                    "unique must be a boolean, got {other}"
                )));
            }
        };
        let order = AxisOrder::from_option(args.take(KW_ORDER))?;
        let features = Self::take_features(&mut args)?;

        let mut pairs: Vec<CoordPair> = features
            .iter()
            .filter(|feature| self.accepts(feature))
            .filter_map(point_coordinates)
            .collect();
        if unique {
            pairs.truncate(1);
        }
        log::debug!("{} of {} features kept", pairs.len(), features.len());

        let coordinates = Coordinates::new(AxisOrder::LonLat, pairs).reorder(order);
        args.inject(KW_COORD, coordinates.to_value());
        Ok(Normalized::new(coordinates, args))
    }

    fn recognized_keys(&self) -> Vec<&'static str> {
        GEOMETRY_KEYS.to_vec()
    }
}

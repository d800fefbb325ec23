//! Coordinate normalization: pairs, parallel latitude/longitude lists,
//! `{lat, lon}` mappings and the `coord`/`lat`/`lon`/`x`/`y` keywords.

use serde_json::{Map, Value};

use crate::axis::KW_ORDER;
use crate::shape::{
    ShapeMatcher, all_mappings, into_single_sequence, into_two, is_mapping, is_scalar, is_sequence,
    is_truthy, mapping_sequence, resolve_shape,
};
use crate::{AxisOrder, CallArgs, CoordPair, Coordinates, NormalizeError, Normalized, Normalizer};

/// Keyword holding pairs or `{lat, lon}` mappings.
pub const KW_COORD: &str = "coord";
/// Keyword holding latitude values.
pub const KW_LAT: &str = "lat";
/// Keyword holding longitude values.
pub const KW_LON: &str = "lon";
/// Alias of [`KW_LAT`].
pub const KW_X: &str = "x";
/// Alias of [`KW_LON`].
pub const KW_Y: &str = "y";
/// Keyword carrying a pre-encoded polyline.
pub const KW_POLYLINE: &str = "polyline";

const AXIS_KEYS: [&str; 5] = [KW_COORD, KW_LAT, KW_LON, KW_X, KW_Y];
pub(crate) const COORDINATE_KEYS: [&str; 6] = [KW_COORD, KW_LAT, KW_LON, KW_X, KW_Y, KW_ORDER];

/// Raw coordinate input once its shape is known.
enum RawCoordinates {
    /// Pairs or `{lat, lon}` mappings, one per point.
    Points(Vec<Value>),
    /// Parallel latitude and longitude values.
    Axes { lat: Value, lon: Value },
}

const COORDINATE_SHAPES: [ShapeMatcher<RawCoordinates>; 4] = [
    ShapeMatcher::new("positional mappings", all_mappings, points_from_args),
    ShapeMatcher::new("positional pair", single_pair, axes_from_pair),
    ShapeMatcher::new("positional mapping sequence", mapping_sequence, points_from_sequence),
    ShapeMatcher::new("parallel axes", two_axes, axes_from_args),
];

fn is_axis_value(value: &Value) -> bool {
    is_scalar(value) || is_sequence(value)
}

fn single_pair(args: &[Value]) -> bool {
    matches!(args, [Value::Array(items)] if items.len() == 2 && items.iter().all(is_axis_value))
}

fn two_axes(args: &[Value]) -> bool {
    matches!(args, [lat, lon] if is_axis_value(lat) && is_axis_value(lon))
}

fn points_from_args(args: Vec<Value>) -> Result<RawCoordinates, NormalizeError> {
    Ok(RawCoordinates::Points(args))
}

fn points_from_sequence(args: Vec<Value>) -> Result<RawCoordinates, NormalizeError> {
    Ok(RawCoordinates::Points(into_single_sequence(args)?))
}

fn axes_from_pair(args: Vec<Value>) -> Result<RawCoordinates, NormalizeError> {
    axes_from_args(into_single_sequence(args)?)
}

fn axes_from_args(args: Vec<Value>) -> Result<RawCoordinates, NormalizeError> {
    let (lat, lon) = into_two(args)
        .ok_or_else(|| NormalizeError::malformed("expected a latitude and a longitude"))?;
    Ok(RawCoordinates::Axes { lat, lon })
}

fn number(value: &Value, what: &str) -> Result<f64, NormalizeError> {
    value
        .as_f64()
        .ok_or_else(|| NormalizeError::malformed(format!("{what} must be numeric, got {value}")))
}

fn axis_values(value: &Value, what: &str) -> Result<Vec<f64>, NormalizeError> {
    match value {
        Value::Array(items) => items.iter().map(|item| number(item, what)).collect(),
        scalar => Ok(vec![number(scalar, what)?]),
    }
}

fn mapping_pair(map: &Map<String, Value>) -> Result<CoordPair, NormalizeError> {
    match (map.get(KW_LAT), map.get(KW_LON)) {
        (Some(lat), Some(lon)) => Ok(CoordPair::new(
            number(lat, KW_LAT)?,
            number(lon, KW_LON)?,
        )),
        _ => Err(NormalizeError::malformed(
            "coordinate mappings must carry both 'lat' and 'lon'",
        )),
    }
}

fn point_pair(point: &Value) -> Result<CoordPair, NormalizeError> {
    match point {
        Value::Object(map) => mapping_pair(map),
        Value::Array(items) => match items.as_slice() {
            [lat, lon] => Ok(CoordPair::new(number(lat, KW_LAT)?, number(lon, KW_LON)?)),
            _ => Err(NormalizeError::malformed(format!(
                "coordinate pairs must have two elements, got {point}"
            ))),
        },
        other => Err(NormalizeError::malformed(format!(
            "coordinates must be pairs or mappings, got {other}"
        ))),
    }
}

impl RawCoordinates {
    /// Interpret the `coord` keyword: one pair, one mapping, or a list of
    /// either.
    fn from_coord(value: Value) -> Result<Self, NormalizeError> {
        match value {
            mapping if is_mapping(&mapping) => Ok(Self::Points(vec![mapping])),
            Value::Array(items) if items.len() == 2 && items.iter().all(is_scalar) => {
                Ok(Self::Points(vec![Value::Array(items)]))
            }
            Value::Array(items) => Ok(Self::Points(items)),
            other => Err(NormalizeError::malformed(format!(
                "coord must be a pair, a mapping or a list of either, got {other}"
            ))),
        }
    }

    /// Build latitude-first pairs.
    fn into_pairs(self) -> Result<Vec<CoordPair>, NormalizeError> {
        match self {
            Self::Points(points) => points.iter().map(point_pair).collect(),
            Self::Axes { lat, lon } => {
                let lats = axis_values(&lat, KW_LAT)?;
                let lons = axis_values(&lon, KW_LON)?;
                if lats.len() != lons.len() {
                    return Err(NormalizeError::CardinalityConflict(format!(
                        "{} latitudes cannot be paired with {} longitudes",
                        lats.len(),
                        lons.len()
                    )));
                }
                Ok(lats
                    .into_iter()
                    .zip(lons)
                    .map(|(lat_value, lon_value)| CoordPair::new(lat_value, lon_value))
                    .collect())
            }
        }
    }
}

fn take_alias(
    args: &mut CallArgs,
    key: &'static str,
    alias: &'static str,
) -> Result<Option<Value>, NormalizeError> {
    match (args.take_present(key), args.take_present(alias)) {
        (Some(_), Some(_)) => Err(NormalizeError::ambiguous(format!(
            "'{key}' and its alias '{alias}' were both supplied"
        ))),
        (primary, secondary) => Ok(primary.or(secondary)),
    }
}

/// Canonicalises coordinate inputs into [`Coordinates`] in the requested
/// axis order.
///
/// Positional shapes, in priority order:
/// 1. every positional argument a mapping;
/// 2. one positional two-element sequence of numbers or sequences, read as
///    `(lat, lon)`;
/// 3. one positional sequence of mappings;
/// 4. two positional numbers or sequences, read as `(lat, lon)`.
///
/// The canonical value is `None` only when the polyline bypass is enabled
/// and a truthy `polyline` keyword is present; decoding is left to the
/// wrapped operation, which still receives the `polyline` keyword.
///
/// # Examples
///
/// ```
/// use geoargs_core::{CallArgs, CoordPair, Engine, Normalizer, OneOrMany};
/// use serde_json::json;
///
/// let args = CallArgs::new().arg(json!([26.062951, -80.238853]));
/// let coords = Engine::default().coordinate().normalize(args)?.value.expect("pairs");
/// assert_eq!(coords.pairs, OneOrMany::One(CoordPair::new(26.062951, -80.238853)));
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CoordinateNormalizer {
    polyline: bool,
}

impl Default for CoordinateNormalizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CoordinateNormalizer {
    /// Build a normalizer; `polyline` enables the encoded-polyline bypass.
    #[must_use]
    pub const fn new(polyline: bool) -> Self {
        Self { polyline }
    }

    fn polyline_requested(&self, args: &CallArgs) -> bool {
        self.polyline && args.keywords.get(KW_POLYLINE).is_some_and(is_truthy)
    }
}

impl Normalizer for CoordinateNormalizer {
    type Output = Option<Coordinates>;

    fn normalize(
        &self,
        mut args: CallArgs,
    ) -> Result<Normalized<Option<Coordinates>>, NormalizeError> {
        let order = AxisOrder::from_option(args.take(KW_ORDER))?;
        let raw = if args.has_positional() {
            if args.contains_any(&AXIS_KEYS) {
                return Err(NormalizeError::ambiguous(
                    "positional coordinates cannot be combined with coordinate keywords",
                ));
            }
            let (_, raw) =
                resolve_shape(&COORDINATE_SHAPES, args.take_positional(), "coordinate")?;
            raw
        } else {
            let coord = args.take_present(KW_COORD);
            let lat = take_alias(&mut args, KW_LAT, KW_X)?;
            let lon = take_alias(&mut args, KW_LON, KW_Y)?;
            if self.polyline_requested(&args) {
                log::warn!("encoded polyline supplied; coordinate decoding is left to the caller");
                return Ok(Normalized::new(None, args));
            }
            match (coord, lat, lon) {
                (None, None, None) => {
                    return Err(NormalizeError::missing("no coordinate arguments supplied"));
                }
                (Some(_), Some(_), _) | (Some(_), None, Some(_)) => {
                    return Err(NormalizeError::ambiguous(
                        "coord cannot be combined with lat/lon",
                    ));
                }
                (Some(coord_value), None, None) => RawCoordinates::from_coord(coord_value)?,
                (None, Some(lat_value), Some(lon_value)) => RawCoordinates::Axes {
                    lat: lat_value,
                    lon: lon_value,
                },
                (None, Some(_), None) => {
                    return Err(NormalizeError::missing("lon is required alongside lat"));
                }
                (None, None, Some(_)) => {
                    return Err(NormalizeError::missing("lat is required alongside lon"));
                }
            }
        };
        let pairs = raw.into_pairs()?;
        if pairs.is_empty() {
            return Err(NormalizeError::missing("no coordinate pairs could be built"));
        }
        let coordinates = Coordinates::new(AxisOrder::LatLon, pairs).reorder(order);
        Ok(Normalized::new(Some(coordinates), args))
    }

    fn recognized_keys(&self) -> Vec<&'static str> {
        COORDINATE_KEYS.to_vec()
    }
}

//! Place normalization: positional strings or `place`/`address` keywords,
//! optionally combined with `city`, `zip` and `country`.

use serde_json::Value;

use crate::shape::{ShapeMatcher, into_single_sequence, is_string, resolve_shape};
use crate::{CallArgs, NormalizeError, Normalized, Normalizer, OneOrMany};

/// Keyword holding one or more place names.
pub const KW_PLACE: &str = "place";
/// Alias of [`KW_PLACE`]; supplying both is ambiguous.
pub const KW_ADDRESS: &str = "address";
/// Keyword holding one or more city names.
pub const KW_CITY: &str = "city";
/// Keyword holding one or more country names.
pub const KW_COUNTRY: &str = "country";
/// Keyword holding one or more postal codes.
pub const KW_ZIP: &str = "zip";

pub(crate) const PLACE_KEYS: [&str; 5] = [KW_PLACE, KW_ADDRESS, KW_CITY, KW_COUNTRY, KW_ZIP];

/// Ordered place strings; a single place collapses to a scalar.
pub type PlaceList = OneOrMany<String>;

const PLACE_SHAPES: [ShapeMatcher<Vec<String>>; 2] = [
    ShapeMatcher::new("positional strings", all_strings, strings_from_args),
    ShapeMatcher::new("positional sequence", single_sequence, strings_from_sequence),
];

fn all_strings(args: &[Value]) -> bool {
    args.iter().all(is_string)
}

fn single_sequence(args: &[Value]) -> bool {
    matches!(args, [Value::Array(_)])
}

fn strings_from_args(args: Vec<Value>) -> Result<Vec<String>, NormalizeError> {
    args.into_iter()
        .map(|value| place_string(KW_PLACE, value))
        .collect()
}

fn strings_from_sequence(args: Vec<Value>) -> Result<Vec<String>, NormalizeError> {
    strings_from_args(into_single_sequence(args)?)
}

fn place_string(field: &str, value: Value) -> Result<String, NormalizeError> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Ok(text),
        other => Err(NormalizeError::malformed(format!(
            "{field} entries must be non-empty strings, got {other}"
        ))),
    }
}

fn field_values(field: &str, value: Value) -> Result<Vec<String>, NormalizeError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| place_string(field, item))
            .collect(),
        other => Ok(vec![place_string(field, other)?]),
    }
}

/// Join `field` onto `places` entry by entry, broadcasting a length-1 side.
///
/// An empty `places` list is seeded from `field`. Lists of equal length are
/// joined pairwise; any other length mismatch is a cardinality conflict.
///
/// # Errors
/// Returns [`NormalizeError::CardinalityConflict`] when neither list has
/// length one and their lengths differ.
///
/// # Examples
///
/// ```
/// use geoargs_core::broadcast_join;
///
/// let places = vec!["Eurostat".to_owned(), "EIB".to_owned()];
/// let joined = broadcast_join(places, vec!["Luxembourg".to_owned()], "city")?;
/// assert_eq!(joined, ["Eurostat, Luxembourg", "EIB, Luxembourg"]);
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
pub fn broadcast_join(
    places: Vec<String>,
    field: Vec<String>,
    field_name: &str,
) -> Result<Vec<String>, NormalizeError> {
    if places.is_empty() {
        return Ok(field);
    }
    if field.is_empty() {
        return Ok(places);
    }
    let width = match (places.len(), field.len()) {
        (p, f) if p == f || f == 1 => p,
        (1, f) => f,
        (p, f) => {
            return Err(NormalizeError::CardinalityConflict(format!(
                "{p} places cannot be combined with {f} {field_name} values"
            )));
        }
    };
    Ok(places
        .iter()
        .cycle()
        .zip(field.iter().cycle())
        .take(width)
        .map(|(place, extra)| format!("{place}, {extra}"))
        .collect())
}

/// Canonicalises place, address, city, zip and country inputs into a
/// [`PlaceList`].
///
/// Positional shapes, in priority order: every positional argument a string,
/// then one positional sequence of strings. Positional input may not be
/// combined with place keywords.
///
/// # Examples
///
/// ```
/// use geoargs_core::{CallArgs, Engine, Normalizer, OneOrMany};
/// use serde_json::json;
///
/// let args = CallArgs::new()
///     .kwarg("city", json!(["Athens", "Heraklion"]))
///     .kwarg("country", "Hellas");
/// let place = Engine::default().place().normalize(args)?.value;
/// assert_eq!(
///     place,
///     OneOrMany::Many(vec!["Athens, Hellas".to_owned(), "Heraklion, Hellas".to_owned()])
/// );
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceNormalizer;

impl PlaceNormalizer {
    fn from_keywords(args: &mut CallArgs) -> Result<Vec<String>, NormalizeError> {
        let place = args.take_present(KW_PLACE);
        let address = args.take_present(KW_ADDRESS);
        let city = args.take_present(KW_CITY);
        let zip = args.take_present(KW_ZIP);
        let country = args.take_present(KW_COUNTRY);

        let base = match (place, address) {
            (Some(_), Some(_)) => {
                return Err(NormalizeError::ambiguous(
                    "place and address are aliases; supply only one",
                ));
            }
            (Some(value), None) => field_values(KW_PLACE, value)?,
            (None, Some(value)) => field_values(KW_ADDRESS, value)?,
            (None, None) if city.is_none() && zip.is_none() && country.is_none() => {
                return Err(NormalizeError::missing("no place arguments supplied"));
            }
            (None, None) => Vec::new(),
        };

        [(KW_CITY, city), (KW_ZIP, zip), (KW_COUNTRY, country)]
            .into_iter()
            .try_fold(base, |places, (field_name, field)| match field {
                Some(value) => broadcast_join(places, field_values(field_name, value)?, field_name),
                None => Ok(places),
            })
    }
}

impl Normalizer for PlaceNormalizer {
    type Output = PlaceList;

    fn normalize(&self, mut args: CallArgs) -> Result<Normalized<PlaceList>, NormalizeError> {
        let places = if args.has_positional() {
            if args.contains_any(&PLACE_KEYS) {
                return Err(NormalizeError::ambiguous(
                    "positional places cannot be combined with place keywords",
                ));
            }
            let (_, places) = resolve_shape(&PLACE_SHAPES, args.take_positional(), "place")?;
            places
        } else {
            Self::from_keywords(&mut args)?
        };
        if places.is_empty() {
            return Err(NormalizeError::missing("no place could be built"));
        }
        Ok(Normalized::new(OneOrMany::from_vec(places), args))
    }

    fn recognized_keys(&self) -> Vec<&'static str> {
        PLACE_KEYS.to_vec()
    }
}

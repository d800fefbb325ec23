//! NUTS attribute records and their level filter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shape::{
    ShapeMatcher, all_mappings, find_shape, into_single_sequence, mapping_sequence, stringify,
};
use crate::{CallArgs, NormalizeError, Normalized, Normalizer};

/// Keyword holding one record or a list of records.
pub const KW_NUTS: &str = "nuts";
/// Keyword selecting the administrative level to keep.
pub const KW_LEVEL: &str = "level";
/// Flat keyword holding a record's attribute mapping.
pub const KW_ATTRIBUTES: &str = "attributes";
/// Flat keyword holding the display field name.
pub const KW_DISPLAY_FIELD_NAME: &str = "displayFieldName";
/// Flat keyword holding the layer identifier.
pub const KW_LAYER_ID: &str = "layerId";
/// Flat keyword holding the layer name.
pub const KW_LAYER_NAME: &str = "layerName";
/// Flat keyword holding the displayed value.
pub const KW_VALUE: &str = "value";

const FLAT_KEYS: [&str; 5] = [
    KW_ATTRIBUTES,
    KW_DISPLAY_FIELD_NAME,
    KW_LAYER_ID,
    KW_LAYER_NAME,
    KW_VALUE,
];
const RECORD_KEYS: [&str; 6] = [
    KW_NUTS,
    KW_ATTRIBUTES,
    KW_DISPLAY_FIELD_NAME,
    KW_LAYER_ID,
    KW_LAYER_NAME,
    KW_VALUE,
];
const NUTS_KEYS: [&str; 7] = [
    KW_NUTS,
    KW_ATTRIBUTES,
    KW_DISPLAY_FIELD_NAME,
    KW_LAYER_ID,
    KW_LAYER_NAME,
    KW_VALUE,
    KW_LEVEL,
];

const LEVEL_CODE: &str = "LEVL_CODE";
const NUTS_ID: &str = "NUTS_ID";
const CNTR_CODE: &str = "CNTR_CODE";
const NUTS_NAME: &str = "NUTS_NAME";
const OBJECT_ID: &str = "OBJECTID";
const MAX_LEVEL: u8 = 3;

const NUTS_SHAPES: [ShapeMatcher<Vec<Value>>; 2] = [
    ShapeMatcher::new("positional records", all_mappings, Ok),
    ShapeMatcher::new("positional record sequence", mapping_sequence, into_single_sequence),
];

/// One NUTS region as returned by GISCO identify/find queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutsRecord {
    /// Region attributes, including `LEVL_CODE` and `NUTS_ID`.
    pub attributes: Map<String, Value>,
    /// Name of the attribute used for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field_name: Option<String>,
    /// Service layer identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_id: Option<Value>,
    /// Service layer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_name: Option<String>,
    /// Displayed value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl NutsRecord {
    fn text(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// `LEVL_CODE` rendered as text, whether stored as a string or a number.
    #[must_use]
    pub fn level_code(&self) -> Option<String> {
        self.attributes.get(LEVEL_CODE).and_then(stringify)
    }

    /// Administrative level, if `LEVL_CODE` is a valid level in `0..=3`.
    #[must_use]
    pub fn level(&self) -> Option<u8> {
        self.level_code()?
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|level| *level <= MAX_LEVEL)
    }

    /// Whether `LEVL_CODE` matches the stringified `level`.
    #[must_use]
    pub fn matches_level(&self, level: &str) -> bool {
        self.level_code().as_deref() == Some(level)
    }

    /// The `NUTS_ID` attribute.
    #[must_use]
    pub fn nuts_id(&self) -> Option<&str> {
        self.text(NUTS_ID)
    }

    /// The `CNTR_CODE` attribute.
    #[must_use]
    pub fn cntr_code(&self) -> Option<&str> {
        self.text(CNTR_CODE)
    }

    /// The `NUTS_NAME` attribute.
    #[must_use]
    pub fn nuts_name(&self) -> Option<&str> {
        self.text(NUTS_NAME)
    }

    /// The `OBJECTID` attribute rendered as text.
    #[must_use]
    pub fn object_id(&self) -> Option<String> {
        self.attributes.get(OBJECT_ID).and_then(stringify)
    }
}

fn parse_records(raw: Vec<Value>) -> Result<Vec<NutsRecord>, NormalizeError> {
    raw.into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|err| {
                NormalizeError::malformed(format!("NUTS attributes not recognised: {err}"))
            })
        })
        .collect()
}

fn level_filter(value: Option<Value>) -> Result<Option<String>, NormalizeError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => stringify(&raw).map(Some).ok_or_else(|| {
            NormalizeError::InvalidOption(format!("level must be a number or a string, got {raw}"))
        }),
    }
}

/// Collects NUTS records from positional or keyword input and keeps those
/// at the requested `level`.
///
/// Absence of any NUTS input is tolerated: the canonical value is `None`.
/// Filtering may empty the list without failing.
///
/// # Examples
///
/// ```
/// use geoargs_core::{CallArgs, Engine, Normalizer};
/// use serde_json::json;
///
/// let args = CallArgs::new()
///     .kwarg("attributes", json!({"LEVL_CODE": "2", "NUTS_ID": "BE10"}))
///     .kwarg("layerId", 2)
///     .kwarg("level", 2);
/// let records = Engine::default().nuts().normalize(args)?.value.unwrap_or_default();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records.first().and_then(|record| record.nuts_id()), Some("BE10"));
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NutsNormalizer;

impl NutsNormalizer {
    fn take_raw(args: &mut CallArgs) -> Result<Option<Vec<Value>>, NormalizeError> {
        if args.has_positional() {
            match find_shape(&NUTS_SHAPES, &args.positional) {
                Some(_) if args.contains_any(&RECORD_KEYS) => {
                    return Err(NormalizeError::ambiguous(
                        "positional NUTS records cannot be combined with NUTS keywords",
                    ));
                }
                Some(matcher) => {
                    log::debug!("NUTS arguments matched shape '{}'", matcher.name());
                    return matcher.extract(args.take_positional()).map(Some);
                }
                None => log::debug!("positional arguments are not NUTS records"),
            }
        }

        let nuts = args.take_present(KW_NUTS);
        let flat: Map<String, Value> = FLAT_KEYS
            .iter()
            .filter_map(|key| args.take_present(key).map(|value| ((*key).to_owned(), value)))
            .collect();
        match (nuts, flat.is_empty()) {
            (Some(_), false) => Err(NormalizeError::ambiguous(
                "the nuts keyword cannot be combined with flat NUTS attributes",
            )),
            (Some(Value::Array(items)), true) => Ok(Some(items)),
            (Some(record @ Value::Object(_)), true) => Ok(Some(vec![record])),
            (Some(other), true) => Err(NormalizeError::malformed(format!(
                "nuts must be a record or a list of records, got {other}"
            ))),
            (None, false) => Ok(Some(vec![Value::Object(flat)])),
            (None, true) => Ok(None),
        }
    }
}

impl Normalizer for NutsNormalizer {
    type Output = Option<Vec<NutsRecord>>;

    fn normalize(
        &self,
        mut args: CallArgs,
    ) -> Result<Normalized<Option<Vec<NutsRecord>>>, NormalizeError> {
        let level = level_filter(args.take(KW_LEVEL))?;
        let raw = match Self::take_raw(&mut args)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                log::debug!("no NUTS records supplied");
                return Ok(Normalized::new(None, args));
            }
        };
        let mut records = parse_records(raw)?;
        if let Some(wanted) = level.as_deref() {
            records.retain(|record| record.matches_level(wanted));
            log::debug!("{} NUTS records at level {wanted}", records.len());
        }
        Ok(Normalized::new(Some(records), args))
    }

    fn recognized_keys(&self) -> Vec<&'static str> {
        NUTS_KEYS.to_vec()
    }
}

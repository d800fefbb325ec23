//! Primitive value predicates and ordered positional shape matchers.
//!
//! Every normalizer resolves positional overloads through a fixed list of
//! [`ShapeMatcher`]s. The list order is the priority order: the first
//! matcher whose predicate accepts the arguments wins.

use serde_json::Value;

use crate::NormalizeError;

/// Whether `value` is a string.
#[must_use]
pub const fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Whether `value` is a flat sequence. Strings are never sequences.
#[must_use]
pub const fn is_sequence(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

/// Whether `value` is a mapping.
#[must_use]
pub const fn is_mapping(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Whether `value` is a numeric scalar.
#[must_use]
pub const fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

/// Whether `value` carries no information: `null`, `""`, `[]` or `{}`.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Whether `value` is truthy: neither blank, `false` nor zero.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        other => !is_blank(other),
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Read an integer, accepting integral floats such as `2013.0`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "the float is integral and bounded by the exact-integer range"
)]
pub fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|float| float.fract() == 0.0 && float.abs() < MAX_EXACT_FLOAT)
            .map(|float| float as i64)
    })
}

/// Render a string or number as text, e.g. to compare level codes.
///
/// Integral numbers render without a fraction, so `2.0` becomes `"2"`.
#[must_use]
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(
            as_integer(value).map_or_else(|| number.to_string(), |integer| integer.to_string()),
        ),
        _ => None,
    }
}

/// Whether every positional argument is a mapping.
#[must_use]
pub fn all_mappings(args: &[Value]) -> bool {
    args.iter().all(is_mapping)
}

/// Whether the arguments are one positional sequence of mappings.
#[must_use]
pub fn mapping_sequence(args: &[Value]) -> bool {
    matches!(args, [Value::Array(items)] if items.iter().all(is_mapping))
}

/// Split a two-item list into its items.
pub(crate) fn into_two(values: Vec<Value>) -> Option<(Value, Value)> {
    let mut items = values.into_iter();
    match (items.next(), items.next(), items.next()) {
        (Some(first), Some(second), None) => Some((first, second)),
        _ => None,
    }
}

/// Unwrap the single positional sequence accepted by a matcher.
pub(crate) fn into_single_sequence(values: Vec<Value>) -> Result<Vec<Value>, NormalizeError> {
    match values.into_iter().next() {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(NormalizeError::malformed("expected a single positional sequence")),
    }
}

/// A named positional overload: a predicate and the extractor it guards.
pub struct ShapeMatcher<T> {
    name: &'static str,
    matches: fn(&[Value]) -> bool,
    extract: fn(Vec<Value>) -> Result<T, NormalizeError>,
}

impl<T> ShapeMatcher<T> {
    /// Build a matcher from a predicate and an extractor.
    #[must_use]
    pub const fn new(
        name: &'static str,
        matches: fn(&[Value]) -> bool,
        extract: fn(Vec<Value>) -> Result<T, NormalizeError>,
    ) -> Self {
        Self {
            name,
            matches,
            extract,
        }
    }

    /// Human-readable shape name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this shape accepts `positional`.
    #[must_use]
    pub fn accepts(&self, positional: &[Value]) -> bool {
        (self.matches)(positional)
    }

    /// Extract the shape's value from `positional`.
    ///
    /// # Errors
    /// Propagates the extractor's [`NormalizeError`].
    pub fn extract(&self, positional: Vec<Value>) -> Result<T, NormalizeError> {
        (self.extract)(positional)
    }
}

/// Return the first matcher accepting `positional`, in priority order.
#[must_use]
pub fn find_shape<'m, T>(
    matchers: &'m [ShapeMatcher<T>],
    positional: &[Value],
) -> Option<&'m ShapeMatcher<T>> {
    matchers.iter().find(|matcher| matcher.accepts(positional))
}

/// Resolve `positional` against `matchers`, failing when nothing applies.
///
/// Returns the name of the winning shape alongside its extracted value.
///
/// # Errors
/// Returns [`NormalizeError::MalformedArgument`] when no matcher accepts the
/// arguments, or the winning extractor's error.
pub fn resolve_shape<T>(
    matchers: &[ShapeMatcher<T>],
    positional: Vec<Value>,
    context: &str,
) -> Result<(&'static str, T), NormalizeError> {
    let Some(matcher) = find_shape(matchers, &positional) else {
        return Err(NormalizeError::malformed(format!(
            "positional {context} arguments not recognised"
        )));
    };
    log::debug!("{context} arguments matched shape '{}'", matcher.name());
    let value = matcher.extract(positional)?;
    Ok((matcher.name(), value))
}

//! Exactly-one-of composition of place and coordinate normalization.

use serde::Serialize;
use serde_json::Value;

use crate::coordinate::{COORDINATE_KEYS, KW_COORD};
use crate::place::{KW_PLACE, PLACE_KEYS, PlaceList};
use crate::{
    CallArgs, CoordinateNormalizer, Coordinates, NormalizeError, Normalized, Normalizer,
    PlaceNormalizer,
};

/// Either a place or a set of coordinates, whichever the caller supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Location {
    /// Place names.
    Place(PlaceList),
    /// Coordinate pairs.
    Coordinates(Coordinates),
}

impl Location {
    /// Keyword under which this value is injected into the remaining
    /// arguments.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Place(_) => KW_PLACE,
            Self::Coordinates(_) => KW_COORD,
        }
    }

    /// JSON rendering injected into keyword arguments.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Place(places) => serde_json::to_value(places).unwrap_or_default(),
            Self::Coordinates(coordinates) => coordinates.to_value(),
        }
    }
}

/// Runs place and coordinate normalization side by side and keeps the one
/// that succeeded.
///
/// Both sub-normalizers are always evaluated before arbitrating. Neither
/// succeeding is a [`NormalizeError::MissingArgument`]; both succeeding is a
/// [`NormalizeError::AmbiguousArgument`]. The winner is returned and also
/// injected into the remaining arguments under `place` or `coord`, with the
/// raw keys of both families stripped.
///
/// # Examples
///
/// ```
/// use geoargs_core::{CallArgs, Engine, Location, Normalizer};
///
/// let args = CallArgs::new().kwarg("lat", 50.0).kwarg("lon", 4.0);
/// let normalized = Engine::default().place_or_coordinate().normalize(args)?;
/// assert!(matches!(normalized.value, Location::Coordinates(_)));
/// assert!(normalized.remaining.keywords.contains_key("coord"));
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNormalizer {
    place: PlaceNormalizer,
    coordinate: CoordinateNormalizer,
}

impl LocationNormalizer {
    /// Compose the given place and coordinate normalizers.
    #[must_use]
    pub const fn new(place: PlaceNormalizer, coordinate: CoordinateNormalizer) -> Self {
        Self { place, coordinate }
    }
}

impl Normalizer for LocationNormalizer {
    type Output = Location;

    fn normalize(&self, args: CallArgs) -> Result<Normalized<Location>, NormalizeError> {
        let place = self
            .place
            .normalize(args.clone())
            .inspect_err(|err| log::debug!("no place parsed: {err}"))
            .ok();
        let coordinates = self
            .coordinate
            .normalize(args)
            .inspect_err(|err| log::debug!("no coordinates parsed: {err}"))
            .ok()
            .and_then(|normalized| {
                let Normalized { value, remaining } = normalized;
                value.map(|coords| Normalized::new(coords, remaining))
            });

        let (location, mut remaining) = match (place, coordinates) {
            (None, None) => {
                return Err(NormalizeError::missing(
                    "neither a place nor coordinates could be parsed",
                ));
            }
            (Some(_), Some(_)) => {
                return Err(NormalizeError::ambiguous(
                    "both a place and coordinates were supplied",
                ));
            }
            (Some(Normalized { value, remaining }), None) => (Location::Place(value), remaining),
            (None, Some(Normalized { value, remaining })) => {
                (Location::Coordinates(value), remaining)
            }
        };
        remaining.strip(&PLACE_KEYS);
        remaining.strip(&COORDINATE_KEYS);
        remaining.inject(location.keyword(), location.to_value());
        Ok(Normalized::new(location, remaining))
    }

    fn recognized_keys(&self) -> Vec<&'static str> {
        let mut keys = self.place.recognized_keys();
        keys.extend(self.coordinate.recognized_keys());
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AxisOrder, CoordPair, Coordinates, ErrorKind, OneOrMany};
    use rstest::rstest;
    use serde_json::json;

    fn locate(args: CallArgs) -> Result<Normalized<Location>, NormalizeError> {
        LocationNormalizer::default().normalize(args)
    }

    #[rstest]
    fn place_keywords_win() {
        let normalized = locate(CallArgs::new().kwarg("place", "Berlin, Germany"))
            .expect("place parsed");
        assert_eq!(
            normalized.value,
            Location::Place(OneOrMany::One("Berlin, Germany".to_owned()))
        );
        assert_eq!(
            normalized.remaining,
            CallArgs::new().kwarg("place", "Berlin, Germany")
        );
    }

    #[rstest]
    fn positional_place_string() {
        let normalized = locate(CallArgs::new().arg("Athens")).expect("place parsed");
        assert!(matches!(normalized.value, Location::Place(_)));
        assert!(!normalized.remaining.has_positional());
    }

    #[rstest]
    fn positional_pair_is_a_coordinate() {
        let normalized = locate(CallArgs::new().arg(json!([52.5, 13.4]))).expect("coordinate");
        let Location::Coordinates(coords) = normalized.value else {
            panic!("expected coordinates");
        };
        assert_eq!(coords.pairs, OneOrMany::One(CoordPair::new(52.5, 13.4)));
        assert_eq!(
            normalized.remaining.keywords.get("coord"),
            Some(&json!([52.5, 13.4]))
        );
    }

    #[rstest]
    fn raw_keys_of_both_families_are_stripped() {
        let args = CallArgs::new()
            .kwarg("lat", 1)
            .kwarg("lon", 2)
            .kwarg("order", "Ll")
            .kwarg("timeout", 10);
        let normalized = locate(args).expect("coordinate");
        assert_eq!(
            normalized.remaining,
            CallArgs::new()
                .kwarg("timeout", 10)
                .kwarg("coord", json!([2.0, 1.0]))
        );
    }

    #[rstest]
    #[case(Location::Place(OneOrMany::One("Athens".to_owned())), json!("Athens"))]
    #[case(
        Location::Place(OneOrMany::Many(vec!["Athens".to_owned(), "Sparta".to_owned()])),
        json!(["Athens", "Sparta"])
    )]
    #[case(
        Location::Coordinates(Coordinates::new(
            AxisOrder::LatLon,
            vec![CoordPair::new(1.0, 2.0), CoordPair::new(3.0, 4.0)]
        )),
        json!([[1.0, 2.0], [3.0, 4.0]])
    )]
    fn injected_value_is_the_bare_payload(#[case] location: Location, #[case] expected: Value) {
        assert_eq!(location.to_value(), expected);
    }

    #[rstest]
    fn neither_family_is_missing() {
        let err = locate(CallArgs::new().kwarg("timeout", 10)).expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::MissingArgument);
    }

    #[rstest]
    fn both_families_are_ambiguous() {
        let args = CallArgs::new()
            .kwarg("place", "Athens")
            .kwarg("lat", 37.98)
            .kwarg("lon", 23.72);
        let err = locate(args).expect_err("ambiguous");
        assert_eq!(err.kind(), ErrorKind::AmbiguousArgument);
    }
}

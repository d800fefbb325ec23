//! Behavioural tests for coordinate normalization.

use geoargs_core::{
    AxisOrder, CallArgs, CoordPair, Coordinates, Engine, ErrorKind, NormalizeError, Normalizer,
    OneOrMany,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use std::cell::RefCell;

type Outcome = Option<Result<Option<Coordinates>, NormalizeError>>;

#[fixture]
fn engine() -> Engine {
    Engine::default()
}

#[fixture]
fn args() -> RefCell<CallArgs> {
    RefCell::new(CallArgs::new())
}

#[fixture]
fn outcome() -> RefCell<Outcome> {
    RefCell::new(None)
}

fn coordinates(outcome: &RefCell<Outcome>) -> Coordinates {
    outcome
        .borrow()
        .clone()
        .expect("normalization ran")
        .expect("coordinates returned")
        .expect("no polyline bypass")
}

fn assert_error(outcome: &RefCell<Outcome>, kind: ErrorKind) {
    let borrow = outcome.borrow();
    let err = borrow
        .as_ref()
        .expect("normalization ran")
        .as_ref()
        .expect_err("expected an error");
    assert_eq!(err.kind(), kind);
}

#[given("the positional pair 26.062951, -80.238853")]
fn given_pair(#[from(args)] args: &RefCell<CallArgs>) {
    *args.borrow_mut() = CallArgs::new().arg(json!([26.062951, -80.238853]));
}

#[given("latitude and longitude lists with order Ll")]
fn given_lists(#[from(args)] args: &RefCell<CallArgs>) {
    *args.borrow_mut() = CallArgs::new()
        .kwarg("lat", json!([50.85, 48.86]))
        .kwarg("lon", json!([4.35, 2.35]))
        .kwarg("order", "Ll");
}

#[given("both a coord keyword and lat and lon keywords")]
fn given_mixed(#[from(args)] args: &RefCell<CallArgs>) {
    *args.borrow_mut() = CallArgs::new()
        .kwarg("coord", json!([50.85, 4.35]))
        .kwarg("lat", 48.86)
        .kwarg("lon", 2.35);
}

#[given("two latitudes and three longitudes")]
fn given_mismatched(#[from(args)] args: &RefCell<CallArgs>) {
    *args.borrow_mut() = CallArgs::new()
        .kwarg("lat", json!([50.85, 48.86]))
        .kwarg("lon", json!([4.35, 2.35, 13.4]));
}

#[when("I normalize the coordinates")]
fn when_normalize(
    #[from(engine)] engine: &Engine,
    #[from(args)] args: &RefCell<CallArgs>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    let result = engine
        .coordinate()
        .normalize(args.borrow().clone())
        .map(|normalized| normalized.value);
    *outcome.borrow_mut() = Some(result);
}

#[then("the single pair 26.062951, -80.238853 is returned")]
fn then_single(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let coords = coordinates(outcome);
    assert_eq!(coords.order, AxisOrder::LatLon);
    assert_eq!(coords.pairs, OneOrMany::One(CoordPair::new(26.062951, -80.238853)));
}

#[then("longitude-first pairs are returned")]
fn then_reversed(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let coords = coordinates(outcome);
    assert_eq!(coords.order, AxisOrder::LonLat);
    assert_eq!(
        coords.pairs,
        OneOrMany::Many(vec![CoordPair::new(4.35, 50.85), CoordPair::new(2.35, 48.86)])
    );
}

#[then("the coordinates are rejected as ambiguous")]
fn then_ambiguous(#[from(outcome)] outcome: &RefCell<Outcome>) {
    assert_error(outcome, ErrorKind::AmbiguousArgument);
}

#[then("the coordinates are rejected as a cardinality conflict")]
fn then_conflict(#[from(outcome)] outcome: &RefCell<Outcome>) {
    assert_error(outcome, ErrorKind::CardinalityConflict);
}

#[scenario(path = "tests/features/coordinate.feature", index = 0)]
fn single_pair(engine: Engine, args: RefCell<CallArgs>, outcome: RefCell<Outcome>) {
    let _ = (engine, args, outcome);
}

#[scenario(path = "tests/features/coordinate.feature", index = 1)]
fn parallel_lists(engine: Engine, args: RefCell<CallArgs>, outcome: RefCell<Outcome>) {
    let _ = (engine, args, outcome);
}

#[scenario(path = "tests/features/coordinate.feature", index = 2)]
fn mixed_families(engine: Engine, args: RefCell<CallArgs>, outcome: RefCell<Outcome>) {
    let _ = (engine, args, outcome);
}

#[scenario(path = "tests/features/coordinate.feature", index = 3)]
fn mismatched_axes(engine: Engine, args: RefCell<CallArgs>, outcome: RefCell<Outcome>) {
    let _ = (engine, args, outcome);
}

//! Behavioural tests for exactly-one-of place or coordinate normalization.

use geoargs_core::{CallArgs, Engine, ErrorKind, Location, NormalizeError, Normalized, Normalizer};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use std::cell::RefCell;

type Outcome = Option<Result<Normalized<Location>, NormalizeError>>;

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

fn assert_error(outcome: &RefCell<Outcome>, kind: ErrorKind) {
    let borrow = outcome.borrow();
    let err = borrow
        .as_ref()
        .expect("normalization ran")
        .as_ref()
        .expect_err("expected an error");
    assert_eq!(err.kind(), kind);
}

#[given("latitude and longitude keywords only")]
fn given_coordinates(#[from(args)] args: &RefCell<CallArgs>) {
    *args.borrow_mut() = CallArgs::new()
        .kwarg("lat", 49.6116)
        .kwarg("lon", 6.1319)
        .kwarg("timeout", 10);
}

#[given("only unrelated keywords")]
fn given_unrelated(#[from(args)] args: &RefCell<CallArgs>) {
    *args.borrow_mut() = CallArgs::new().kwarg("timeout", 10);
}

#[given("a place together with latitude and longitude keywords")]
fn given_both(#[from(args)] args: &RefCell<CallArgs>) {
    *args.borrow_mut() = CallArgs::new()
        .kwarg("place", "Luxembourg")
        .kwarg("lat", 49.6116)
        .kwarg("lon", 6.1319);
}

#[when("I normalize the location")]
fn when_normalize(
    #[from(engine)] engine: &Engine,
    #[from(args)] args: &RefCell<CallArgs>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    let result = engine
        .place_or_coordinate()
        .normalize(args.borrow().clone());
    *outcome.borrow_mut() = Some(result);
}

#[then("coordinates are injected as the coord keyword")]
fn then_injected(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let borrow = outcome.borrow();
    let normalized = borrow
        .as_ref()
        .expect("normalization ran")
        .as_ref()
        .expect("location returned");
    assert!(matches!(normalized.value, Location::Coordinates(_)));
    assert_eq!(
        normalized.remaining,
        CallArgs::new()
            .kwarg("timeout", 10)
            .kwarg("coord", json!([49.6116, 6.1319]))
    );
}

#[then("the location is rejected as missing")]
fn then_missing(#[from(outcome)] outcome: &RefCell<Outcome>) {
    assert_error(outcome, ErrorKind::MissingArgument);
}

#[then("the location is rejected as ambiguous")]
fn then_ambiguous(#[from(outcome)] outcome: &RefCell<Outcome>) {
    assert_error(outcome, ErrorKind::AmbiguousArgument);
}

#[scenario(path = "tests/features/location.feature", index = 0)]
fn coordinates_only(engine: Engine, args: RefCell<CallArgs>, outcome: RefCell<Outcome>) {
    let _ = (engine, args, outcome);
}

#[scenario(path = "tests/features/location.feature", index = 1)]
fn neither_family(engine: Engine, args: RefCell<CallArgs>, outcome: RefCell<Outcome>) {
    let _ = (engine, args, outcome);
}

#[scenario(path = "tests/features/location.feature", index = 2)]
fn both_families(engine: Engine, args: RefCell<CallArgs>, outcome: RefCell<Outcome>) {
    let _ = (engine, args, outcome);
}

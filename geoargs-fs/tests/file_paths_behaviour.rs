//! Behavioural tests for filesystem-backed file normalization and
//! configuration loading.

use camino::{Utf8Path, Utf8PathBuf};
use geoargs_core::{
    CallArgs, ConfigError, Engine, EngineConfig, NormalizeError, Normalizer, ResolvedPath,
};
use geoargs_fs::{file_normalizer, load_engine_config, real_path};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

type PathOutcome = Option<Result<ResolvedPath, NormalizeError>>;
type ConfigOutcome = Option<Result<EngineConfig, ConfigError>>;

#[fixture]
fn args() -> RefCell<CallArgs> {
    RefCell::new(CallArgs::new())
}

#[fixture]
fn path_outcome() -> RefCell<PathOutcome> {
    RefCell::new(None)
}

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().expect("create temp dir")
}

#[fixture]
fn config_path() -> RefCell<Option<Utf8PathBuf>> {
    RefCell::new(None)
}

#[fixture]
fn config_outcome() -> RefCell<ConfigOutcome> {
    RefCell::new(None)
}

fn resolved(outcome: &RefCell<PathOutcome>) -> ResolvedPath {
    outcome
        .borrow()
        .clone()
        .expect("normalization ran")
        .expect("path resolved")
}

#[given("the directory /data and the base name x.shp")]
fn given_dir_and_base(#[from(args)] args: &RefCell<CallArgs>) {
    *args.borrow_mut() = CallArgs::new().kwarg("dir", "/data").kwarg("base", "x.shp");
}

#[given("the file keyword raw/countries.geojson")]
fn given_file(#[from(args)] args: &RefCell<CallArgs>) {
    *args.borrow_mut() = CallArgs::new().kwarg("file", "raw/countries.geojson");
}

#[given("an engine configuration file disabling the OSM key check")]
fn given_config_file(
    #[from(workspace)] workspace: &TempDir,
    #[from(config_path)] config_path: &RefCell<Option<Utf8PathBuf>>,
) {
    let dir = Utf8PathBuf::from_path_buf(workspace.path().to_path_buf()).expect("utf8 temp path");
    let path = dir.join("geoargs.json");
    std::fs::write(&path, r#"{"check_osm_key": false}"#).expect("write config");
    *config_path.borrow_mut() = Some(path);
}

#[when("I normalize the file arguments")]
fn when_normalize(
    #[from(args)] args: &RefCell<CallArgs>,
    #[from(path_outcome)] path_outcome: &RefCell<PathOutcome>,
) {
    let result = file_normalizer(&Engine::default())
        .normalize(args.borrow().clone())
        .map(|normalized| normalized.value);
    *path_outcome.borrow_mut() = Some(result);
}

#[when("I load the engine configuration")]
fn when_load(
    #[from(config_path)] config_path: &RefCell<Option<Utf8PathBuf>>,
    #[from(config_outcome)] config_outcome: &RefCell<ConfigOutcome>,
) {
    let path = config_path.borrow().clone().expect("configuration written");
    *config_outcome.borrow_mut() = Some(load_engine_config(&path));
}

#[then("the path /data/x.shp is returned")]
fn then_joined(#[from(path_outcome)] path_outcome: &RefCell<PathOutcome>) {
    let expected = real_path(Utf8Path::new("/data"))
        .expect("root is resolvable")
        .join("x.shp");
    assert_eq!(resolved(path_outcome), ResolvedPath::Single(expected));
    if !Utf8Path::new("/data").exists() {
        assert_eq!(
            resolved(path_outcome),
            ResolvedPath::Single(Utf8PathBuf::from("/data/x.shp"))
        );
    }
}

#[then("the path raw/countries.geojson is returned")]
fn then_passthrough(#[from(path_outcome)] path_outcome: &RefCell<PathOutcome>) {
    assert_eq!(
        resolved(path_outcome),
        ResolvedPath::Single(Utf8PathBuf::from("raw/countries.geojson"))
    );
}

#[then("the OSM key check is disabled")]
fn then_config(#[from(config_outcome)] config_outcome: &RefCell<ConfigOutcome>) {
    let borrow = config_outcome.borrow();
    let config = borrow
        .as_ref()
        .expect("configuration loaded")
        .as_ref()
        .expect("valid configuration");
    assert!(!config.check_osm_key);
    assert!(config.check_type);
    let engine = Engine::new(config.clone()).expect("engine builds");
    assert!(!engine.config().check_osm_key);
}

#[scenario(path = "tests/features/file_paths.feature", index = 0)]
fn dir_and_base(args: RefCell<CallArgs>, path_outcome: RefCell<PathOutcome>) {
    let _ = (args, path_outcome);
}

#[scenario(path = "tests/features/file_paths.feature", index = 1)]
fn file_passthrough(args: RefCell<CallArgs>, path_outcome: RefCell<PathOutcome>) {
    let _ = (args, path_outcome);
}

#[scenario(path = "tests/features/file_paths.feature", index = 2)]
fn configuration_file(
    workspace: TempDir,
    config_path: RefCell<Option<Utf8PathBuf>>,
    config_outcome: RefCell<ConfigOutcome>,
) {
    let _ = (workspace, config_path, config_outcome);
}

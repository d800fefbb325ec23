//! Facade crate for the geoargs normalization engine.
//!
//! This crate re-exports the engine surface from `geoargs-core` and, behind
//! the `fs` feature, the filesystem-backed helpers from `geoargs-fs`.

#![forbid(unsafe_code)]

pub use geoargs_core::{
    AxisOrder, CallArgs, Chain, ConfigError, CoordPair, CoordinateNormalizer, Coordinates, Engine,
    EngineConfig, Epsg, ErrorKind, FileNormalizer, GeometryNormalizer, Location,
    LocationNormalizer, NormalizeError, Normalized, Normalizer, NutsNormalizer, NutsRecord,
    NutsYear, OneOrMany, PathResolver, PlaceList, PlaceNormalizer, ProjectionNormalizer,
    ResolvedPath, YearNormalizer, broadcast_join, shape,
};
#[cfg(feature = "fs")]
pub use geoargs_fs::{RealPathResolver, file_normalizer, load_engine_config, real_path};

//! The engine: validated configuration and the normalizers built from it.

use crate::{
    ConfigError, CoordinateNormalizer, EngineConfig, Epsg, FileNormalizer, GeometryNormalizer,
    LocationNormalizer, NutsNormalizer, PathResolver, PlaceNormalizer, ProjectionNormalizer,
    YearNormalizer,
};

/// Hands out normalizers configured from one immutable [`EngineConfig`].
///
/// Normalizers are cheap values holding no shared state, so an engine may be
/// shared across threads and each normalizer used concurrently.
///
/// # Examples
///
/// ```
/// use geoargs_core::{CallArgs, Engine, EngineConfig, Normalizer};
///
/// let engine = Engine::new(EngineConfig::default().with_default_projection("LAEA"))?;
/// let proj = engine.projection().normalize(CallArgs::new())?.value;
/// assert_eq!(proj.map(|epsg| epsg.code()), Some(3035));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    projection: Epsg,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            projection: Epsg::WGS84,
        }
    }
}

impl Engine {
    /// Validate `config` and build an engine from it.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the configuration fails
    /// validation.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let validated = config.validate()?;
        let projection = validated.projection()?;
        log::debug!(
            "engine configured: projection {projection}, default year {}",
            validated.default_year
        );
        Ok(Self {
            config: validated,
            projection,
        })
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Place names from positional strings or place keywords.
    #[must_use]
    pub const fn place(&self) -> PlaceNormalizer {
        PlaceNormalizer
    }

    /// Coordinate pairs, honouring the configured polyline bypass.
    #[must_use]
    pub const fn coordinate(&self) -> CoordinateNormalizer {
        CoordinateNormalizer::new(self.config.polyline)
    }

    /// Exactly one of a place or coordinates.
    #[must_use]
    pub const fn place_or_coordinate(&self) -> LocationNormalizer {
        LocationNormalizer::new(self.place(), self.coordinate())
    }

    /// Point-place coordinates filtered from feature collections.
    #[must_use]
    pub const fn geometry(&self) -> GeometryNormalizer {
        GeometryNormalizer::new(self.config.check_type, self.config.check_osm_key)
    }

    /// NUTS records filtered by level.
    #[must_use]
    pub const fn nuts(&self) -> NutsNormalizer {
        NutsNormalizer
    }

    /// EPSG codes, defaulting to the configured projection.
    #[must_use]
    pub const fn projection(&self) -> ProjectionNormalizer {
        ProjectionNormalizer::new(self.projection)
    }

    /// Reference years checked against the configured allow-list.
    #[must_use]
    pub fn year(&self) -> YearNormalizer {
        YearNormalizer::new(self.config.supported_years.clone(), self.config.default_year)
    }

    /// File paths, resolving directories with `resolver`.
    #[must_use]
    pub const fn file<R: PathResolver>(&self, resolver: R) -> FileNormalizer<R> {
        FileNormalizer::new(resolver)
    }
}

//! Reference-year validation against the supported NUTS vintages.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::shape::{as_integer, is_blank};
use crate::{CallArgs, NormalizeError, Normalized, Normalizer};

/// Keyword holding the reference year.
pub const KW_YEAR: &str = "year";

/// NUTS vintages supported unless configured otherwise.
pub const DEFAULT_SUPPORTED_YEARS: [u16; 3] = [2006, 2010, 2013];

/// Year used when the `year` keyword is absent.
pub const DEFAULT_YEAR: u16 = 2013;

/// A validated NUTS reference year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NutsYear(u16);

impl NutsYear {
    /// The calendar year.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for NutsYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates the optional `year` keyword against an allow-list.
///
/// # Examples
///
/// ```
/// use geoargs_core::{CallArgs, ErrorKind, Normalizer, YearNormalizer};
///
/// let years = YearNormalizer::new(vec![2010, 2013, 2016], 2016);
/// let year = years.normalize(CallArgs::new())?.value;
/// assert_eq!(year.map(|y| y.value()), Some(2016));
///
/// let rejected = years.normalize(CallArgs::new().kwarg("year", 2006));
/// assert_eq!(rejected.err().map(|err| err.kind()), Some(ErrorKind::UnsupportedValue));
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct YearNormalizer {
    supported: Vec<u16>,
    default: u16,
}

impl Default for YearNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPORTED_YEARS.to_vec(), DEFAULT_YEAR)
    }
}

impl YearNormalizer {
    /// Build a normalizer accepting `supported` and falling back to
    /// `default` when `year` is absent.
    #[must_use]
    pub const fn new(supported: Vec<u16>, default: u16) -> Self {
        Self { supported, default }
    }

    /// The allow-listed years.
    #[must_use]
    pub fn supported(&self) -> &[u16] {
        &self.supported
    }

    fn check(&self, year: u16) -> Result<NutsYear, NormalizeError> {
        if self.supported.contains(&year) {
            Ok(NutsYear(year))
        } else {
            Err(NormalizeError::UnsupportedValue(format!(
                "year {year} not supported"
            )))
        }
    }

    fn parse(&self, raw: &Value) -> Result<NutsYear, NormalizeError> {
        let Some(integer) = as_integer(raw) else {
            return Err(NormalizeError::malformed(format!(
                "year must be an integer, got {raw}"
            )));
        };
        let year = u16::try_from(integer).map_err(|_| {
            NormalizeError::UnsupportedValue(format!("year {raw} not supported"))
        })?;
        self.check(year)
    }
}

impl Normalizer for YearNormalizer {
    type Output = Option<NutsYear>;

    fn normalize(&self, mut args: CallArgs) -> Result<Normalized<Option<NutsYear>>, NormalizeError> {
        let year = match args.take(KW_YEAR) {
            None => Some(self.check(self.default)?),
            Some(raw) if is_blank(&raw) => None,
            Some(raw) => Some(self.parse(&raw)?),
        };
        if let Some(valid) = year {
            args.inject(KW_YEAR, Value::from(valid.value()));
        }
        Ok(Normalized::new(year, args))
    }

    fn recognized_keys(&self) -> Vec<&'static str> {
        vec![KW_YEAR]
    }
}

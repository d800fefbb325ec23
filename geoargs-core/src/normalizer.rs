//! The normalizer interface and its pipeline combinator.
//!
//! A normalizer is a pure transform from raw call arguments to a canonical
//! value plus the untouched remainder of the call. Keywords a normalizer does
//! not recognise always survive into [`Normalized::remaining`].

use crate::{CallArgs, NormalizeError};

/// A canonical value together with the arguments left for the wrapped
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    /// Canonical value produced by the normalizer.
    pub value: T,
    /// Arguments not consumed by the normalizer.
    pub remaining: CallArgs,
}

impl<T> Normalized<T> {
    /// Pair a canonical value with the remaining arguments.
    #[must_use]
    pub const fn new(value: T, remaining: CallArgs) -> Self {
        Self { value, remaining }
    }
}

/// Reduce permissive call-site arguments to one canonical value.
///
/// # Examples
///
/// ```
/// use geoargs_core::{CallArgs, Engine, Normalizer, OneOrMany};
///
/// let engine = Engine::default();
/// let args = CallArgs::new().kwarg("place", "Bruxelles, Belgium").kwarg("timeout", 5);
/// let echoed = engine
///     .place()
///     .call(args, |place, rest| (place, rest.keywords.len()))?;
/// assert_eq!(echoed, (OneOrMany::One("Bruxelles, Belgium".to_owned()), 1));
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
pub trait Normalizer {
    /// Canonical value produced on success.
    type Output;

    /// Consume the recognised arguments and canonicalise them.
    ///
    /// # Errors
    /// Returns a [`NormalizeError`] describing the first violated
    /// constraint; no partial result is produced.
    fn normalize(&self, args: CallArgs) -> Result<Normalized<Self::Output>, NormalizeError>;

    /// Keyword names this normalizer consumes.
    fn recognized_keys(&self) -> Vec<&'static str>;

    /// Normalize `args` and, on success only, invoke `operation` with the
    /// canonical value and the remaining arguments.
    ///
    /// # Errors
    /// Returns the normalizer's error without calling `operation`.
    fn call<R, F>(&self, args: CallArgs, operation: F) -> Result<R, NormalizeError>
    where
        Self: Sized,
        F: FnOnce(Self::Output, CallArgs) -> R,
    {
        let Normalized { value, remaining } = self.normalize(args)?;
        Ok(operation(value, remaining))
    }

    /// Run `next` on the arguments this normalizer leaves behind.
    #[must_use]
    fn then<B>(self, next: B) -> Chain<Self, B>
    where
        Self: Sized,
        B: Normalizer,
    {
        Chain {
            first: self,
            second: next,
        }
    }
}

/// Two normalizers applied in sequence; built by [`Normalizer::then`].
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Normalizer for Chain<A, B>
where
    A: Normalizer,
    B: Normalizer,
{
    type Output = (A::Output, B::Output);

    fn normalize(&self, args: CallArgs) -> Result<Normalized<Self::Output>, NormalizeError> {
        let Normalized {
            value: first,
            remaining,
        } = self.first.normalize(args)?;
        let Normalized {
            value: second,
            remaining: rest,
        } = self.second.normalize(remaining)?;
        Ok(Normalized::new((first, second), rest))
    }

    fn recognized_keys(&self) -> Vec<&'static str> {
        let mut keys = self.first.recognized_keys();
        keys.extend(self.second.recognized_keys());
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Engine;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::cell::Cell;

    #[fixture]
    fn engine() -> Engine {
        Engine::default()
    }

    #[rstest]
    fn call_skips_operation_on_failure(engine: Engine) {
        let invoked = Cell::new(false);
        let result = engine
            .year()
            .call(CallArgs::new().kwarg("year", 2020), |_, _| invoked.set(true));
        assert!(result.is_err());
        assert!(!invoked.get(), "wrapped operation must not run after a failure");
    }

    #[rstest]
    fn chain_threads_remaining_arguments(engine: Engine) {
        let args = CallArgs::new()
            .kwarg("proj", "LAEA")
            .kwarg("year", 2010)
            .kwarg("format", "json");
        let normalized = engine
            .projection()
            .then(engine.year())
            .normalize(args)
            .expect("both normalizers succeed");
        let (proj, year) = normalized.value;
        assert_eq!(proj.map(|epsg| epsg.code()), Some(3035));
        assert_eq!(year.map(|y| y.value()), Some(2010));
        assert_eq!(normalized.remaining.keywords.get("format"), Some(&json!("json")));
    }

    #[rstest]
    fn chain_reports_keys_of_both_stages(engine: Engine) {
        let keys = engine.projection().then(engine.year()).recognized_keys();
        assert_eq!(keys, vec!["proj", "year"]);
    }
}

//! Raw call-site arguments and the single-or-many canonical container.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::shape::is_blank;

/// Positional and keyword arguments captured at a call boundary.
///
/// Values are raw JSON so GeoJSON-like payloads can be passed verbatim.
///
/// # Examples
///
/// ```
/// use geoargs_core::CallArgs;
///
/// let mut args = CallArgs::new().arg("Athens").kwarg("timeout", 30);
/// assert!(args.has_positional());
/// assert_eq!(args.take("timeout"), Some(30.into()));
/// assert!(args.keywords.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    /// Positional arguments in call order.
    pub positional: Vec<Value>,
    /// Keyword arguments keyed by name.
    pub keywords: Map<String, Value>,
}

impl CallArgs {
    /// Create an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument, replacing any previous value.
    #[must_use]
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(key.into(), value.into());
        self
    }

    /// Whether any positional argument was supplied.
    #[must_use]
    pub fn has_positional(&self) -> bool {
        !self.positional.is_empty()
    }

    /// Remove and return every positional argument.
    pub fn take_positional(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.positional)
    }

    /// Remove a keyword argument and return its value.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.keywords.remove(key)
    }

    /// Remove a keyword argument, treating blank values as absent.
    ///
    /// `null`, `""`, `[]` and `{}` are all considered blank.
    pub fn take_present(&mut self, key: &str) -> Option<Value> {
        self.take(key).filter(|value| !is_blank(value))
    }

    /// Whether any of `keys` is present as a keyword.
    #[must_use]
    pub fn contains_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.keywords.contains_key(*key))
    }

    /// Remove every keyword listed in `keys`.
    pub fn strip(&mut self, keys: &[&str]) {
        for key in keys {
            self.keywords.remove(*key);
        }
    }

    /// Insert a keyword argument carrying a canonical value.
    pub fn inject(&mut self, key: impl Into<String>, value: Value) {
        self.keywords.insert(key.into(), value);
    }
}

/// A canonical value that collapses to a scalar when it holds one item.
///
/// # Examples
///
/// ```
/// use geoargs_core::OneOrMany;
///
/// assert_eq!(OneOrMany::from_vec(vec!["Athens"]), OneOrMany::One("Athens"));
/// assert_eq!(OneOrMany::<&str>::from_vec(Vec::new()).len(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Exactly one item.
    One(T),
    /// Zero or several items, in input order.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Build from a list, collapsing a single item to [`OneOrMany::One`].
    #[must_use]
    pub fn from_vec(mut items: Vec<T>) -> Self {
        if items.len() == 1 {
            if let Some(item) = items.pop() {
                return Self::One(item);
            }
        }
        Self::Many(items)
    }

    /// Number of items held.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// Whether no item is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First item, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// View the items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(item) => std::slice::from_ref(item),
            Self::Many(items) => items,
        }
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Expand into a plain list.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }

    /// Apply `f` to every item, keeping the one-or-many shape.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> OneOrMany<U> {
        match self {
            Self::One(item) => OneOrMany::One(f(item)),
            Self::Many(items) => OneOrMany::Many(items.into_iter().map(f).collect()),
        }
    }
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

//! The variable environment for VM execution.

use rustc_hash::FxHashMap;

/// A flat mapping from variable name to its current integer value.
///
/// The language has a single global scope, so there is no outer environment
/// to chain to; a store overwrites any existing binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: FxHashMap<String, i64>,
}

impl Environment {
    /// Creates a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a variable, overwriting any existing binding.
    pub fn set(&mut self, name: String, value: i64) {
        self.bindings.insert(name, value);
    }

    /// Gets a variable's value.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.bindings.get(name).copied()
    }

    /// Returns true if the variable is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Iterates over all bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// The number of bound variables.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

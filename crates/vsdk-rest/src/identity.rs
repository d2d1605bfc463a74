//! REST identity of an entity type

use std::fmt;

/// `(name, category)` pair routing requests for one entity type:
/// `name` is the singular REST name, `category` the plural path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub name: &'static str,
    pub category: &'static str,
}

impl Identity {
    pub const fn new(name: &'static str, category: &'static str) -> Self {
        Self { name, category }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

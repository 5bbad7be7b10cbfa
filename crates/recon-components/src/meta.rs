//! Object metadata shared by the component kinds

use serde::{Deserialize, Serialize};

/// Object metadata carried by every component instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Instance name
    pub name: String,
}

impl ObjectMeta {
    /// Metadata with only a name
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

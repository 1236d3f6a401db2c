//! Type-safe identifier wrappers.
//!
//! Crop identifiers come from the configuration file (e.g. `"carrot"`), so
//! [`CropId`] wraps a string. Task and story identifiers are small integers
//! assigned in the content tables; they get their own newtypes to prevent
//! accidental mixing at compile time.

use serde::{Deserialize, Serialize};

/// Identifier of a crop type, as declared in the plant table of the
/// configuration (e.g. `"carrot"`, `"rose"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropId(String);

impl CropId {
    /// Create a crop identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CropId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CropId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for CropId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw numeric identifier.
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Return the inner numeric value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_numeric_id! {
    /// Unique identifier for a task in the progression table.
    TaskId
}

define_numeric_id! {
    /// Unique identifier for a story entry in the narrative table.
    StoryId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_id_roundtrip_serde() {
        let original = CropId::new("carrot");
        let json = serde_json::to_string(&original).ok();
        assert_eq!(json.as_deref(), Some("\"carrot\""));
        let restored: Result<CropId, _> = serde_json::from_str("\"carrot\"");
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn numeric_ids_are_transparent() {
        let task = TaskId::new(3);
        assert_eq!(serde_json::to_string(&task).ok().as_deref(), Some("3"));
        assert_eq!(task.into_inner(), 3);
        assert_eq!(task.to_string(), "3");
    }

    #[test]
    fn ids_are_distinct_types() {
        // TaskId and StoryId share a representation but not a type --
        // the compiler enforces no mixing.
        let task = TaskId::new(1);
        let story = StoryId::new(1);
        assert_eq!(task.into_inner(), story.into_inner());
    }
}

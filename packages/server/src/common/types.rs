// Common types used across multiple domains and layers
//
// These types are shared between the kernel and domain layers to avoid
// circular dependencies while maintaining type safety.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of thing a resource is. Stored as lowercase text in Postgres
/// and in payment metadata, so conversion goes through `as_str`/`parse`
/// rather than a DB enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Room,
    Vehicle,
    Parking,
}

impl ResourceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Room => "room",
            ResourceCategory::Vehicle => "vehicle",
            ResourceCategory::Parking => "parking",
        }
    }

    /// Parse a category string, accepting aliases still sent by older
    /// app builds ("car", "parking-slot").
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "room" => Some(ResourceCategory::Room),
            "vehicle" | "car" => Some(ResourceCategory::Vehicle),
            "parking" | "parking-slot" => Some(ResourceCategory::Parking),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Capabilities and platform versions.
//!
//! A capability is what the application actually cares about ("take a
//! picture", "read the gallery"). Each one maps to one or more permission
//! identifiers, and that mapping may depend on the platform version.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PermitError;

/// First platform version (Android API level 33) that replaced the broad
/// storage-read permission with per-media-type permissions.
pub const MEDIA_PERMISSION_THRESHOLD: u32 = 33;

/// A platform version tag, comparable against `MEDIA_PERMISSION_THRESHOLD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformVersion(pub u32);

impl PlatformVersion {
    /// Return true if this version uses media-specific storage permissions.
    pub fn has_media_permissions(self) -> bool {
        self.0 >= MEDIA_PERMISSION_THRESHOLD
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The built-in capabilities.
///
/// Expressed as lowercase strings in TOML and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Camera,
    Storage,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Camera, Capability::Storage];

    pub fn name(self) -> &'static str {
        match self {
            Capability::Camera => "camera",
            Capability::Storage => "storage",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = PermitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "camera" => Ok(Capability::Camera),
            "storage" => Ok(Capability::Storage),
            _ => Err(PermitError::UnknownCapability { name: s.to_string() }),
        }
    }
}

//! Capability entry types and catalog schema.
//!
//! A `CatalogConfig` is deserialized from TOML and holds one
//! `CapabilityEntry` per capability. Each entry carries its base identifiers
//! plus an ordered list of version-gated variants; the first variant whose
//! `min_version` the platform meets wins.

use serde::{Deserialize, Serialize};

use permit_contracts::{capability::PlatformVersion, permission::PermissionId};

/// Identifiers that replace the base list from `min_version` onwards.
///
/// Example in TOML:
/// ```toml
/// [[capabilities.variants]]
/// min_version = 33
/// identifiers = ["android.permission.READ_MEDIA_IMAGES"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionVariant {
    pub min_version: u32,
    pub identifiers: Vec<PermissionId>,
}

impl VersionVariant {
    pub fn applies_to(&self, version: PlatformVersion) -> bool {
        version.0 >= self.min_version
    }
}

/// One capability loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityEntry {
    /// Name callers resolve by, e.g. `"storage"`. Matched case-sensitively.
    pub name: String,

    /// Optional human-readable explanation, printed by the demo when the
    /// catalog is loaded from a file.
    #[serde(default)]
    pub description: Option<String>,

    /// Identifiers used when no variant applies.
    pub identifiers: Vec<PermissionId>,

    /// Version-gated replacements, tested in declaration order.
    #[serde(default)]
    pub variants: Vec<VersionVariant>,
}

impl CapabilityEntry {
    /// Return the identifiers this capability needs on `version`.
    pub fn identifiers_for(&self, version: PlatformVersion) -> &[PermissionId] {
        self.variants
            .iter()
            .find(|v| v.applies_to(version))
            .map_or(self.identifiers.as_slice(), |v| v.identifiers.as_slice())
    }
}

/// The top-level structure deserialized from a TOML catalog file.
///
/// Example:
/// ```toml
/// [[capabilities]]
/// name = "camera"
/// identifiers = ["android.permission.CAMERA"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub capabilities: Vec<CapabilityEntry>,
}

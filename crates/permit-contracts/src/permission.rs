//! Permission identifiers.
//!
//! A `PermissionId` names one revocable capability of the host operating
//! system. PERMIT never interprets the string; it only compares it and hands
//! it back to the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Camera access.
pub const CAMERA: &str = "android.permission.CAMERA";

/// Read access to images in shared media storage (API level 33 and later).
pub const READ_MEDIA_IMAGES: &str = "android.permission.READ_MEDIA_IMAGES";

/// Broad read access to shared external storage (before API level 33).
pub const READ_EXTERNAL_STORAGE: &str = "android.permission.READ_EXTERNAL_STORAGE";

/// An opaque permission identifier defined by the host platform.
///
/// Example: `PermissionId::new("android.permission.CAMERA")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(pub String);

impl PermissionId {
    /// Construct an identifier from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PermissionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

//! TOML-driven capability catalog.
//!
//! `CapabilityCatalog` loads a `CatalogConfig` from a TOML string or file and
//! implements the `IdentifierSource` trait from permit-core.
//!
//! Resolution algorithm:
//!
//! 1. Find the entry whose `name` equals the requested capability.
//!    None → `UnknownCapability`.
//! 2. Return the identifiers of the first variant whose `min_version` the
//!    platform version meets, or the entry's base identifiers if none does.
//!
//! Load-time validation guarantees every capability resolves to a non-empty
//! list on every version.

use std::{collections::HashSet, path::Path};

use tracing::{debug, warn};

use permit_contracts::{
    capability::PlatformVersion,
    error::{PermitError, PermitResult},
    permission::PermissionId,
};
use permit_core::traits::IdentifierSource;

use crate::rule::{CapabilityEntry, CatalogConfig};

/// An `IdentifierSource` built from a TOML document.
///
/// ```rust,ignore
/// use permit_catalog::CapabilityCatalog;
///
/// let catalog = CapabilityCatalog::from_file(Path::new("catalog.toml"))?;
/// let flow = PermissionFlow::new(Box::new(catalog), PlatformVersion(34));
/// ```
#[derive(Debug, Clone)]
pub struct CapabilityCatalog {
    config: CatalogConfig,
}

impl CapabilityCatalog {
    /// Parse `s` as TOML and build a validated catalog.
    ///
    /// Returns `PermitError::ConfigError` if the TOML is malformed, a
    /// capability is declared twice, or any identifier list is empty.
    pub fn from_toml_str(s: &str) -> PermitResult<Self> {
        let config: CatalogConfig = toml::from_str(s).map_err(|e| PermitError::ConfigError {
            reason: format!("failed to parse catalog TOML: {}", e),
        })?;
        validate(&config)?;
        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as a catalog.
    pub fn from_file(path: &Path) -> PermitResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PermitError::ConfigError {
            reason: format!("failed to read catalog file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn get(&self, name: &str) -> Option<&CapabilityEntry> {
        self.config.capabilities.iter().find(|c| c.name == name)
    }

    /// Capability names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.config.capabilities.iter().map(|c| c.name.as_str())
    }
}

fn validate(config: &CatalogConfig) -> PermitResult<()> {
    let mut seen = HashSet::new();

    for entry in &config.capabilities {
        if !seen.insert(entry.name.as_str()) {
            return Err(PermitError::ConfigError {
                reason: format!("capability '{}' declared more than once", entry.name),
            });
        }
        if entry.identifiers.is_empty() {
            return Err(PermitError::ConfigError {
                reason: format!("capability '{}' has no identifiers", entry.name),
            });
        }
        if let Some(v) = entry.variants.iter().find(|v| v.identifiers.is_empty()) {
            return Err(PermitError::ConfigError {
                reason: format!(
                    "capability '{}' variant for version {} has no identifiers",
                    entry.name, v.min_version
                ),
            });
        }
    }
    Ok(())
}

impl IdentifierSource for CapabilityCatalog {
    fn resolve(
        &self,
        capability: &str,
        version: PlatformVersion,
    ) -> PermitResult<Vec<PermissionId>> {
        let Some(entry) = self.get(capability) else {
            warn!(capability = %capability, "capability not in catalog");
            return Err(PermitError::UnknownCapability { name: capability.to_string() });
        };

        let identifiers = entry.identifiers_for(version).to_vec();
        debug!(
            capability = %capability,
            version = %version,
            count = identifiers.len(),
            "capability resolved"
        );
        Ok(identifiers)
    }
}

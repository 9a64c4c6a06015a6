//! In-memory implementation of the provider traits.
//!
//! `InMemoryHost` is the reference `StatusProvider` / `RationaleProvider`.
//! It keeps per-permission state in a `HashMap` and can be loaded from a TOML
//! fixture, so tests and the demo can stand in for a real platform.
//!
//! Permissions the host has never seen are reported the way a platform
//! reports a permission it never asked for: denied, with no rationale.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use permit_contracts::{
    error::{PermitError, PermitResult},
    grant::GrantState,
    permission::PermissionId,
};

use crate::traits::{RationaleProvider, StatusProvider};

/// Host-side state of one permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPermission {
    pub granted: bool,
    /// Whether the host would still show a rationale before re-prompting.
    #[serde(default)]
    pub show_rationale: bool,
}

#[derive(Debug, Deserialize)]
struct HostFixture {
    #[serde(default)]
    permissions: Vec<FixtureEntry>,
}

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    id: PermissionId,
    #[serde(flatten)]
    state: HostPermission,
}

/// A permission host backed by a plain map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    permissions: HashMap<PermissionId, HostPermission>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `s` as a TOML host fixture.
    ///
    /// ```toml
    /// [[permissions]]
    /// id = "android.permission.CAMERA"
    /// granted = false
    /// show_rationale = true
    /// ```
    ///
    /// Returns `PermitError::ConfigError` if the TOML is malformed or lists
    /// the same permission twice.
    pub fn from_toml_str(s: &str) -> PermitResult<Self> {
        let fixture: HostFixture = toml::from_str(s).map_err(|e| PermitError::ConfigError {
            reason: format!("failed to parse host TOML: {}", e),
        })?;

        let mut host = Self::new();
        for entry in fixture.permissions {
            if host.permissions.insert(entry.id.clone(), entry.state).is_some() {
                return Err(PermitError::ConfigError {
                    reason: format!("permission '{}' listed more than once", entry.id),
                });
            }
        }
        Ok(host)
    }

    /// Read the file at `path` and parse it as a host fixture.
    pub fn from_file(path: &Path) -> PermitResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PermitError::ConfigError {
            reason: format!("failed to read host file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Overwrite the state of `permission`.
    pub fn set(&mut self, permission: impl Into<PermissionId>, state: HostPermission) {
        self.permissions.insert(permission.into(), state);
    }

    /// The user granted `permission`.
    pub fn grant(&mut self, permission: impl Into<PermissionId>) {
        self.set(permission, HostPermission { granted: true, show_rationale: false });
    }

    /// The user denied `permission` but may still be asked again.
    pub fn deny(&mut self, permission: impl Into<PermissionId>) {
        self.set(permission, HostPermission { granted: false, show_rationale: true });
    }

    /// The user denied `permission` and asked not to be prompted again.
    pub fn deny_permanently(&mut self, permission: impl Into<PermissionId>) {
        self.set(permission, HostPermission { granted: false, show_rationale: false });
    }

    pub fn state(&self, permission: &PermissionId) -> HostPermission {
        self.permissions.get(permission).copied().unwrap_or_default()
    }
}

impl StatusProvider for InMemoryHost {
    fn check(&self, permission: &PermissionId) -> GrantState {
        let state = self.state(permission);
        debug!(permission = %permission, granted = state.granted, "host status query");
        if state.granted {
            GrantState::Granted
        } else {
            GrantState::Denied
        }
    }
}

impl RationaleProvider for InMemoryHost {
    fn should_show_rationale(&self, permission: &PermissionId) -> bool {
        let state = self.state(permission);
        // A granted permission never needs explaining.
        !state.granted && state.show_rationale
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Host-facing trait definitions.
//!
//! PERMIT never talks to an operating system directly. Everything it needs
//! from the host arrives through these traits:
//!
//! - `StatusProvider`: current grant state of a permission, without prompting
//! - `RationaleProvider`: whether the host would still show an explanation
//! - `IdentifierSource`: which permissions a capability needs on a platform version
//!
//! Implementations are bound to whatever execution context the host needs
//! (an activity, a window, a process); that context is not PERMIT's concern.

use permit_contracts::{
    capability::PlatformVersion,
    error::PermitResult,
    grant::GrantState,
    permission::PermissionId,
};

/// Reports the current grant state of a permission.
pub trait StatusProvider: Send + Sync {
    /// Return the grant state of `permission` without prompting the user.
    fn check(&self, permission: &PermissionId) -> GrantState;
}

/// Reports whether an explanatory rationale should still be shown.
///
/// Hosts stop offering a rationale once the user has chosen a persistent
/// denial, which is what makes a denial "permanent".
pub trait RationaleProvider: StatusProvider {
    /// Return true if the host would still show a rationale for `permission`.
    fn should_show_rationale(&self, permission: &PermissionId) -> bool;
}

/// Maps a capability name to the permissions it requires.
pub trait IdentifierSource: Send + Sync {
    /// Resolve `capability` on `version` to a non-empty identifier list.
    ///
    /// Returns `PermitError::UnknownCapability` for names the source does not
    /// define.
    fn resolve(&self, capability: &str, version: PlatformVersion)
        -> PermitResult<Vec<PermissionId>>;
}

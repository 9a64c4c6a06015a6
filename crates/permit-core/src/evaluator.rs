//! The permission evaluator.
//!
//! Stateless functions that turn host signals into decisions:
//!
//!   Capability → identifiers → host request → outcome → all granted?
//!                                                     ↳ permanently denied?
//!
//! Every function here is total. Absent inputs fall back to a fixed answer
//! rather than an error: nothing to check counts as satisfied, and no host
//! to ask counts as not permanently denied.

use std::collections::HashMap;

use tracing::debug;

use permit_contracts::{
    capability::{Capability, PlatformVersion},
    error::PermitResult,
    grant::{GrantOutcome, GRANTED},
    permission::{self, PermissionId},
};

use crate::traits::{IdentifierSource, RationaleProvider, StatusProvider};

/// Return the permissions `capability` requires on `version`.
///
/// Camera always needs the camera permission. Storage needs the media-image
/// permission from `MEDIA_PERMISSION_THRESHOLD` onwards and the legacy
/// external-storage permission before it.
pub fn required_identifiers(capability: Capability, version: PlatformVersion) -> Vec<PermissionId> {
    let id = match capability {
        Capability::Camera => permission::CAMERA,
        Capability::Storage if version.has_media_permissions() => permission::READ_MEDIA_IMAGES,
        Capability::Storage => permission::READ_EXTERNAL_STORAGE,
    };
    vec![PermissionId::new(id)]
}

/// Return true if every positional grant code is `GRANTED`.
///
/// An empty slice is vacuously granted.
pub fn all_granted(codes: &[i32]) -> bool {
    codes.iter().all(|&code| code == GRANTED)
}

/// Return true if every entry in the keyed outcome is granted.
///
/// A missing map is treated like an empty one: there is nothing denied in it.
pub fn all_granted_map(outcomes: Option<&HashMap<PermissionId, bool>>) -> bool {
    match outcomes {
        Some(map) => map.values().all(|&granted| granted),
        None => {
            debug!("no keyed grant outcome supplied; treating as granted");
            true
        }
    }
}

/// Evaluate either outcome shape.
pub fn outcome_granted(outcome: &GrantOutcome) -> bool {
    match outcome {
        GrantOutcome::Codes(codes) => all_granted(codes),
        GrantOutcome::Keyed(map) => all_granted_map(Some(map)),
    }
}

/// Return true if `provider` reports every identifier as granted.
///
/// Without a provider or without identifiers there is nothing to check, and
/// the answer is true. Stops at the first identifier that is not granted.
pub fn has_permissions(
    provider: Option<&dyn StatusProvider>,
    identifiers: Option<&[PermissionId]>,
) -> bool {
    let (Some(provider), Some(identifiers)) = (provider, identifiers) else {
        return true;
    };

    for id in identifiers {
        if !provider.check(id).is_granted() {
            debug!(permission = %id, "permission not granted");
            return false;
        }
    }
    true
}

/// Return true if any identifier is denied with its rationale suppressed.
///
/// That combination is the host's signal that the user chose a persistent
/// denial: asking again will not show a prompt, only settings can undo it.
/// A first-time denial still offers a rationale and is not permanent.
pub fn is_permanently_denied(
    provider: Option<&dyn RationaleProvider>,
    identifiers: Option<&[PermissionId]>,
) -> bool {
    let (Some(provider), Some(identifiers)) = (provider, identifiers) else {
        return false;
    };

    identifiers.iter().any(|id| {
        let permanent = !provider.should_show_rationale(id) && !provider.check(id).is_granted();
        if permanent {
            debug!(permission = %id, "permission permanently denied");
        }
        permanent
    })
}

/// The built-in camera/storage mapping as an `IdentifierSource`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinIdentifiers;

impl IdentifierSource for BuiltinIdentifiers {
    fn resolve(
        &self,
        capability: &str,
        version: PlatformVersion,
    ) -> PermitResult<Vec<PermissionId>> {
        let capability: Capability = capability.parse()?;
        Ok(required_identifiers(capability, version))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use permit_contracts::{
        capability::MEDIA_PERMISSION_THRESHOLD,
        error::PermitError,
        grant::{GrantState, DENIED},
    };

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A host where exactly the listed permissions are denied. `suppressed`
    /// lists denied permissions whose rationale the host no longer shows.
    struct FakeHost {
        denied: HashSet<&'static str>,
        suppressed: HashSet<&'static str>,
    }

    impl FakeHost {
        fn new(denied: &[&'static str], suppressed: &[&'static str]) -> Self {
            Self {
                denied: denied.iter().copied().collect(),
                suppressed: suppressed.iter().copied().collect(),
            }
        }
    }

    impl StatusProvider for FakeHost {
        fn check(&self, permission: &PermissionId) -> GrantState {
            if self.denied.contains(permission.as_str()) {
                GrantState::Denied
            } else {
                GrantState::Granted
            }
        }
    }

    impl RationaleProvider for FakeHost {
        fn should_show_rationale(&self, permission: &PermissionId) -> bool {
            self.denied.contains(permission.as_str())
                && !self.suppressed.contains(permission.as_str())
        }
    }

    /// Panics if queried; proves a check short-circuited.
    struct UnreachableHost;

    impl StatusProvider for UnreachableHost {
        fn check(&self, permission: &PermissionId) -> GrantState {
            panic!("host must not be queried for {permission}");
        }
    }

    fn ids(names: &[&str]) -> Vec<PermissionId> {
        names.iter().map(|n| PermissionId::new(*n)).collect()
    }

    // ── required_identifiers ──────────────────────────────────────────────────

    #[test]
    fn storage_uses_media_permission_at_and_above_threshold() {
        for level in MEDIA_PERMISSION_THRESHOLD..MEDIA_PERMISSION_THRESHOLD + 5 {
            assert_eq!(
                required_identifiers(Capability::Storage, PlatformVersion(level)),
                ids(&[permission::READ_MEDIA_IMAGES]),
                "level {level}"
            );
        }
    }

    #[test]
    fn storage_uses_legacy_permission_below_threshold() {
        for level in [0, 21, 29, MEDIA_PERMISSION_THRESHOLD - 1] {
            assert_eq!(
                required_identifiers(Capability::Storage, PlatformVersion(level)),
                ids(&[permission::READ_EXTERNAL_STORAGE]),
                "level {level}"
            );
        }
    }

    #[test]
    fn camera_is_independent_of_version() {
        for level in [1, MEDIA_PERMISSION_THRESHOLD - 1, MEDIA_PERMISSION_THRESHOLD, 99] {
            assert_eq!(
                required_identifiers(Capability::Camera, PlatformVersion(level)),
                ids(&[permission::CAMERA])
            );
        }
    }

    #[test]
    fn every_capability_resolves_to_non_empty_list() {
        for cap in Capability::ALL {
            assert!(!required_identifiers(cap, PlatformVersion(30)).is_empty());
            assert!(!required_identifiers(cap, PlatformVersion(34)).is_empty());
        }
    }

    // ── all_granted ───────────────────────────────────────────────────────────

    #[test]
    fn all_granted_codes() {
        assert!(all_granted(&[]));
        assert!(all_granted(&[GRANTED]));
        assert!(!all_granted(&[GRANTED, DENIED]));
        assert!(!all_granted(&[DENIED]));
        assert!(!all_granted(&[GRANTED, 3]));
    }

    #[test]
    fn all_granted_keyed() {
        let empty = HashMap::new();
        assert!(all_granted_map(Some(&empty)));

        let both = HashMap::from([(PermissionId::new("A"), true), (PermissionId::new("B"), true)]);
        assert!(all_granted_map(Some(&both)));

        let one_denied =
            HashMap::from([(PermissionId::new("A"), true), (PermissionId::new("B"), false)]);
        assert!(!all_granted_map(Some(&one_denied)));
    }

    #[test]
    fn all_granted_keyed_missing_map_is_granted() {
        assert!(all_granted_map(None));
    }

    #[test]
    fn outcome_granted_dispatches_on_shape() {
        assert!(outcome_granted(&GrantOutcome::Codes(vec![GRANTED, GRANTED])));
        assert!(!outcome_granted(&GrantOutcome::Codes(vec![DENIED])));
        assert!(!outcome_granted(&GrantOutcome::Keyed(HashMap::from([(
            PermissionId::new("A"),
            false
        )]))));
    }

    // ── has_permissions ───────────────────────────────────────────────────────

    #[test]
    fn has_permissions_without_provider_is_satisfied() {
        assert!(has_permissions(None, Some(&ids(&["A", "B"]))));
    }

    #[test]
    fn has_permissions_without_identifiers_is_satisfied() {
        assert!(has_permissions(Some(&UnreachableHost), None));
    }

    #[test]
    fn has_permissions_all_granted() {
        let host = FakeHost::new(&[], &[]);
        assert!(has_permissions(Some(&host), Some(&ids(&["A", "B"]))));
    }

    #[test]
    fn has_permissions_one_denied() {
        let host = FakeHost::new(&["B"], &[]);
        assert!(!has_permissions(Some(&host), Some(&ids(&["A", "B"]))));
    }

    #[test]
    fn has_permissions_empty_list_never_queries() {
        assert!(has_permissions(Some(&UnreachableHost), Some(&[])));
    }

    // ── is_permanently_denied ─────────────────────────────────────────────────

    #[test]
    fn permanently_denied_without_provider_is_false() {
        assert!(!is_permanently_denied(None, Some(&ids(&["A"]))));
    }

    #[test]
    fn permanently_denied_without_identifiers_is_false() {
        let host = FakeHost::new(&["A"], &["A"]);
        assert!(!is_permanently_denied(Some(&host), None));
    }

    #[test]
    fn denied_with_rationale_suppressed_is_permanent() {
        let host = FakeHost::new(&["A"], &["A"]);
        assert!(is_permanently_denied(Some(&host), Some(&ids(&["A"]))));
    }

    #[test]
    fn first_denial_is_not_permanent() {
        let host = FakeHost::new(&["A"], &[]);
        assert!(!is_permanently_denied(Some(&host), Some(&ids(&["A"]))));
    }

    #[test]
    fn granted_is_not_permanently_denied() {
        let host = FakeHost::new(&[], &[]);
        assert!(!is_permanently_denied(Some(&host), Some(&ids(&["A", "B"]))));
    }

    #[test]
    fn any_permanent_denial_marks_the_set() {
        let host = FakeHost::new(&["B"], &["B"]);
        assert!(is_permanently_denied(Some(&host), Some(&ids(&["A", "B"]))));
    }

    // ── BuiltinIdentifiers ────────────────────────────────────────────────────

    #[test]
    fn builtin_source_resolves_by_name() {
        let source = BuiltinIdentifiers;
        assert_eq!(
            source.resolve("storage", PlatformVersion(32)).unwrap(),
            ids(&[permission::READ_EXTERNAL_STORAGE])
        );
        assert_eq!(
            source.resolve("camera", PlatformVersion(34)).unwrap(),
            ids(&[permission::CAMERA])
        );
    }

    #[test]
    fn builtin_source_rejects_unknown_capability() {
        match BuiltinIdentifiers.resolve("location", PlatformVersion(34)) {
            Err(PermitError::UnknownCapability { name }) => assert_eq!(name, "location"),
            other => panic!("expected UnknownCapability, got {:?}", other),
        }
    }
}

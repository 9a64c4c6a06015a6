//! # permit-contracts
//!
//! Shared types and error contracts for the PERMIT runtime permission
//! evaluator.
//!
//! All crates in the workspace import from here. No evaluation logic lives in
//! this crate, only identifiers, capability and grant types, flow records,
//! and the error type.

pub mod capability;
pub mod error;
pub mod flow;
pub mod grant;
pub mod permission;

#[cfg(test)]
mod tests {
    use super::*;
    use capability::{Capability, PlatformVersion, MEDIA_PERMISSION_THRESHOLD};
    use error::PermitError;
    use flow::{FlowAction, FlowId};
    use grant::{GrantOutcome, GrantState, DENIED, GRANTED};
    use permission::PermissionId;

    // ── Capability ───────────────────────────────────────────────────────────

    #[test]
    fn capability_parses_case_insensitively() {
        assert_eq!("camera".parse::<Capability>().unwrap(), Capability::Camera);
        assert_eq!(" Storage ".parse::<Capability>().unwrap(), Capability::Storage);
    }

    #[test]
    fn capability_unknown_name_is_rejected() {
        match "microphone".parse::<Capability>() {
            Err(PermitError::UnknownCapability { name }) => assert_eq!(name, "microphone"),
            other => panic!("expected UnknownCapability, got {:?}", other),
        }
    }

    #[test]
    fn capability_display_matches_serde_name() {
        for cap in Capability::ALL {
            let json = serde_json::to_string(&cap).unwrap();
            assert_eq!(json, format!("\"{}\"", cap));
        }
    }

    // ── PlatformVersion ──────────────────────────────────────────────────────

    #[test]
    fn media_permissions_start_at_threshold() {
        assert!(!PlatformVersion(MEDIA_PERMISSION_THRESHOLD - 1).has_media_permissions());
        assert!(PlatformVersion(MEDIA_PERMISSION_THRESHOLD).has_media_permissions());
        assert!(PlatformVersion(MEDIA_PERMISSION_THRESHOLD + 1).has_media_permissions());
    }

    // ── GrantState ───────────────────────────────────────────────────────────

    #[test]
    fn grant_state_only_zero_is_granted() {
        assert_eq!(GrantState::from_code(GRANTED), GrantState::Granted);
        assert_eq!(GrantState::from_code(DENIED), GrantState::Denied);
        // Codes the host never documents are still a denial.
        assert_eq!(GrantState::from_code(7), GrantState::Denied);
        assert_eq!(GrantState::Denied.code(), DENIED);
    }

    // ── GrantOutcome::pair ───────────────────────────────────────────────────

    #[test]
    fn pair_zips_identifiers_with_codes() {
        let ids = vec![PermissionId::new("A"), PermissionId::new("B")];
        let paired = GrantOutcome::pair(&ids, &[GRANTED, DENIED]).unwrap();

        assert_eq!(paired.len(), 2);
        assert!(paired[&PermissionId::new("A")]);
        assert!(!paired[&PermissionId::new("B")]);
    }

    #[test]
    fn pair_length_mismatch_is_invalid_argument() {
        let ids = vec![PermissionId::new("A")];
        match GrantOutcome::pair(&ids, &[GRANTED, GRANTED]) {
            Err(PermitError::InvalidArgument { reason }) => {
                assert!(reason.contains("1 identifiers"), "unexpected reason: {reason}");
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn pair_repeated_identifier_requires_every_grant() {
        let ids = vec![PermissionId::new("A"), PermissionId::new("A")];
        let paired = GrantOutcome::pair(&ids, &[GRANTED, DENIED]).unwrap();
        assert_eq!(paired.len(), 1);
        assert!(!paired[&PermissionId::new("A")]);
    }

    // ── Serde shapes ─────────────────────────────────────────────────────────

    #[test]
    fn permission_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&PermissionId::new(permission::CAMERA)).unwrap();
        assert_eq!(json, "\"android.permission.CAMERA\"");
    }

    #[test]
    fn flow_action_request_round_trips() {
        let original = FlowAction::Request {
            identifiers: vec![PermissionId::new(permission::READ_MEDIA_IMAGES)],
        };
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"action\":\"request\""), "unexpected json: {json}");
        let decoded: FlowAction = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn flow_id_new_produces_unique_values() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| FlowId::new().0.to_string()).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── PermitError display messages ─────────────────────────────────────────

    #[test]
    fn error_config_error_display() {
        let err = PermitError::ConfigError {
            reason: "capability 'camera' has no identifiers".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("camera"));
    }

    #[test]
    fn error_unknown_capability_display() {
        let err = PermitError::UnknownCapability { name: "gps".to_string() };
        assert!(err.to_string().contains("'gps'"));
    }
}

//! The permission flow: the request / explain / settings cycle a host screen
//! runs before it may use a capability.
//!
//!   ensure → [Request → on_request_result] → [ExplainDenial → on_explanation_accepted]
//!          → [OpenSettings → on_resume]
//!
//! The flow never prompts anyone itself. Each entry point inspects the host
//! through the evaluator and returns the `FlowAction` the host should carry
//! out next. Every decision is recorded as a `FlowEvent`.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, info, warn};

use permit_contracts::{
    capability::PlatformVersion,
    error::PermitResult,
    flow::{FlowAction, FlowEvent, FlowId, FlowTrigger},
    grant::GrantOutcome,
    permission::PermissionId,
};

use crate::{
    evaluator,
    traits::{IdentifierSource, RationaleProvider},
};

/// Drives the permission cycle for the capabilities of one host screen.
///
/// Construct one flow per screen. The flow owns the identifier source and
/// remembers which capabilities were sent to system settings, so that
/// `on_resume()` can re-check them when the user comes back.
pub struct PermissionFlow {
    id: FlowId,
    source: Box<dyn IdentifierSource>,
    version: PlatformVersion,
    pending_settings: BTreeSet<String>,
    events: Vec<FlowEvent>,
}

impl PermissionFlow {
    pub fn new(source: Box<dyn IdentifierSource>, version: PlatformVersion) -> Self {
        Self {
            id: FlowId::new(),
            source,
            version,
            pending_settings: BTreeSet::new(),
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> &FlowId {
        &self.id
    }

    /// All decisions made so far, in order.
    pub fn events(&self) -> &[FlowEvent] {
        &self.events
    }

    /// Capabilities currently waiting on the user to return from settings.
    pub fn pending_settings(&self) -> impl Iterator<Item = &str> {
        self.pending_settings.iter().map(String::as_str)
    }

    /// Check `capability` before using it.
    ///
    /// Returns `Proceed` if the host already grants every required
    /// permission, otherwise `Request` with the identifiers to prompt for.
    pub fn ensure<H: RationaleProvider>(
        &mut self,
        host: &H,
        capability: &str,
    ) -> PermitResult<FlowAction> {
        let identifiers = self.resolve(capability)?;

        let action = if evaluator::has_permissions(Some(host), Some(&identifiers)) {
            FlowAction::Proceed
        } else {
            FlowAction::Request { identifiers }
        };

        Ok(self.record(capability, FlowTrigger::Ensure, action))
    }

    /// Interpret the positional result codes of a host permission request.
    pub fn on_request_result(&mut self, capability: &str, codes: &[i32]) -> PermitResult<FlowAction> {
        self.on_request_outcome(capability, &GrantOutcome::Codes(codes.to_vec()))
    }

    /// Interpret a host permission request outcome in either shape.
    pub fn on_request_outcome(
        &mut self,
        capability: &str,
        outcome: &GrantOutcome,
    ) -> PermitResult<FlowAction> {
        // Resolve anyway so an unknown capability is an error here too.
        self.resolve(capability)?;

        let action = if evaluator::outcome_granted(outcome) {
            FlowAction::Proceed
        } else {
            FlowAction::ExplainDenial
        };

        Ok(self.record(capability, FlowTrigger::RequestResult, action))
    }

    /// The user accepted the denial explanation and wants to grant access.
    ///
    /// A permanent denial cannot be re-prompted, so the host is told to open
    /// settings and the capability is remembered for `on_resume()`.
    /// Otherwise the permissions are simply requested again.
    pub fn on_explanation_accepted<H: RationaleProvider>(
        &mut self,
        host: &H,
        capability: &str,
    ) -> PermitResult<FlowAction> {
        let identifiers = self.resolve(capability)?;

        let action = if evaluator::is_permanently_denied(Some(host), Some(&identifiers)) {
            self.pending_settings.insert(capability.to_string());
            FlowAction::OpenSettings
        } else {
            FlowAction::Request { identifiers }
        };

        Ok(self.record(capability, FlowTrigger::ExplanationAccepted, action))
    }

    /// The host screen is visible again.
    ///
    /// Every capability that was sent to settings is re-checked exactly once:
    /// `Proceed` if the user granted it there, `ExplainDenial` if not.
    /// Capabilities are returned in name order.
    ///
    /// All pending capabilities are resolved before any is re-checked. If one
    /// fails to resolve, the error is returned and the pending set is kept.
    pub fn on_resume<H: RationaleProvider>(
        &mut self,
        host: &H,
    ) -> PermitResult<Vec<(String, FlowAction)>> {
        let resolved = self
            .pending_settings
            .iter()
            .map(|capability| -> PermitResult<(String, Vec<PermissionId>)> {
                Ok((capability.clone(), self.resolve(capability)?))
            })
            .collect::<PermitResult<Vec<_>>>()?;
        self.pending_settings.clear();

        let mut decisions = Vec::with_capacity(resolved.len());
        for (capability, identifiers) in resolved {
            let action = if evaluator::has_permissions(Some(host), Some(&identifiers)) {
                FlowAction::Proceed
            } else {
                FlowAction::ExplainDenial
            };

            let action = self.record(&capability, FlowTrigger::Resume, action);
            decisions.push((capability, action));
        }

        Ok(decisions)
    }

    fn resolve(&self, capability: &str) -> PermitResult<Vec<PermissionId>> {
        self.source.resolve(capability, self.version).inspect_err(|e| {
            warn!(flow_id = %self.id.0, capability = %capability, error = %e, "capability resolution failed");
        })
    }

    fn record(&mut self, capability: &str, trigger: FlowTrigger, action: FlowAction) -> FlowAction {
        match &action {
            FlowAction::OpenSettings => info!(
                flow_id = %self.id.0,
                capability = %capability,
                "permission permanently denied; directing user to settings"
            ),
            _ => debug!(
                flow_id = %self.id.0,
                capability = %capability,
                trigger = ?trigger,
                action = ?action,
                "flow decision"
            ),
        }

        self.events.push(FlowEvent {
            flow_id: self.id.clone(),
            capability: capability.to_string(),
            trigger,
            action: action.clone(),
            timestamp: Utc::now(),
        });
        action
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

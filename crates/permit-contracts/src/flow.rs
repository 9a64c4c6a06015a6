//! Permission flow actions and event records.
//!
//! `FlowAction` is what `PermissionFlow` tells the host screen to do next.
//! `FlowEvent` is the record of that decision, one per flow call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::permission::PermissionId;

/// Unique identifier for one permission flow (typically one host screen).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowId(pub uuid::Uuid);

impl FlowId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for FlowId {
    fn default() -> Self {
        Self::new()
    }
}

/// The next step the host should take for a capability.
///
/// - `Proceed` → every required permission is granted; use the capability
/// - `Request` → ask the host to prompt for `identifiers`
/// - `ExplainDenial` → show an explanation and let the user accept or dismiss
/// - `OpenSettings` → re-prompting is useless; send the user to app settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FlowAction {
    Proceed,
    Request { identifiers: Vec<PermissionId> },
    ExplainDenial,
    OpenSettings,
}

/// Which flow entry point produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTrigger {
    Ensure,
    RequestResult,
    ExplanationAccepted,
    Resume,
}

/// An immutable record of one flow decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEvent {
    /// The flow that made the decision.
    pub flow_id: FlowId,
    /// Capability name the decision concerns.
    pub capability: String,
    pub trigger: FlowTrigger,
    pub action: FlowAction,
    /// Wall-clock time the decision was made (UTC).
    pub timestamp: DateTime<Utc>,
}

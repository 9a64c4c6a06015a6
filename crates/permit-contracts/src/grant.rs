//! Grant states and grant outcomes.
//!
//! The host reports permission state as integer codes. `GRANTED` is the only
//! code that means "granted"; every other value is treated as a denial.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{PermitError, PermitResult},
    permission::PermissionId,
};

/// Host code for a granted permission.
pub const GRANTED: i32 = 0;

/// Host code for a denied permission.
pub const DENIED: i32 = -1;

/// Current grant state of a single permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantState {
    Granted,
    Denied,
}

impl GrantState {
    /// Interpret a host grant code. Anything other than `GRANTED` is `Denied`.
    pub fn from_code(code: i32) -> Self {
        if code == GRANTED {
            GrantState::Granted
        } else {
            GrantState::Denied
        }
    }

    pub fn code(self) -> i32 {
        match self {
            GrantState::Granted => GRANTED,
            GrantState::Denied => DENIED,
        }
    }

    pub fn is_granted(self) -> bool {
        self == GrantState::Granted
    }
}

/// The result of a permission request, in either of the two shapes hosts
/// deliver it.
///
/// Both shapes carry the same meaning. `Codes` is positional and its order
/// corresponds to the identifier list the caller requested; PERMIT does not
/// check that correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantOutcome {
    Codes(Vec<i32>),
    Keyed(HashMap<PermissionId, bool>),
}

impl GrantOutcome {
    /// Zip requested identifiers with their positional result codes.
    ///
    /// Returns `PermitError::InvalidArgument` when the two lists differ in
    /// length, since the pairing would otherwise be ambiguous.
    pub fn pair(
        identifiers: &[PermissionId],
        codes: &[i32],
    ) -> PermitResult<HashMap<PermissionId, bool>> {
        if identifiers.len() != codes.len() {
            return Err(PermitError::InvalidArgument {
                reason: format!(
                    "{} identifiers but {} grant codes",
                    identifiers.len(),
                    codes.len()
                ),
            });
        }
        // A repeated identifier is granted only if every occurrence was.
        let mut paired = HashMap::with_capacity(identifiers.len());
        for (id, &code) in identifiers.iter().zip(codes) {
            let granted = GrantState::from_code(code).is_granted();
            paired
                .entry(id.clone())
                .and_modify(|g: &mut bool| *g &= granted)
                .or_insert(granted);
        }
        Ok(paired)
    }
}

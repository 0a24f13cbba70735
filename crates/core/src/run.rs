//! Payroll run status constants and state machine.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and any future worker or CLI tooling.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Run status
// ---------------------------------------------------------------------------

/// Lifecycle status of a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Run created but never computed.
    Draft,
    /// Per-employee computation is underway.
    Computing,
    /// Computed payslips awaiting review.
    Review,
    /// Approved: referenced attendance records are locked.
    Approved,
    /// Disbursed. Terminal.
    Released,
    /// Abandoned; computed payslips deleted. Terminal.
    Cancelled,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Computing => "computing",
            Self::Review => "review",
            Self::Approved => "approved",
            Self::Released => "released",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "computing" => Ok(Self::Computing),
            "review" => Ok(Self::Review),
            "approved" => Ok(Self::Approved),
            "released" => Ok(Self::Released),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Invalid run status '{other}'"
            ))),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Released | Self::Cancelled)
    }

    /// Statuses in which payslips may be discarded and recomputed.
    pub fn allows_recompute(self) -> bool {
        matches!(self, Self::Draft | Self::Review)
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

pub mod state_machine {
    use super::*;

    /// Valid target statuses reachable from `from`.
    ///
    /// Terminal states (Released, Cancelled) return an empty slice. A run
    /// already Computing accepts no transition request; the compute job
    /// itself moves it to Review when it finishes.
    pub fn valid_transitions(from: RunStatus) -> &'static [RunStatus] {
        match from {
            RunStatus::Draft => &[RunStatus::Computing, RunStatus::Cancelled],
            RunStatus::Computing => &[RunStatus::Review],
            RunStatus::Review => &[
                RunStatus::Computing,
                RunStatus::Approved,
                RunStatus::Cancelled,
            ],
            RunStatus::Approved => &[RunStatus::Released],
            RunStatus::Released | RunStatus::Cancelled => &[],
        }
    }

    /// Check whether a transition from `from` to `to` is valid.
    pub fn can_transition(from: RunStatus, to: RunStatus) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a transition, producing [`CoreError::InvalidTransition`]
    /// for disallowed edges.
    pub fn validate_transition(from: RunStatus, to: RunStatus) -> Result<(), CoreError> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                reason: format!("{} -> {}", from.as_str(), to.as_str()),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Approval guards
// ---------------------------------------------------------------------------

/// Segregation-of-duties and checklist checks for `approve`.
///
/// Enforced here (server-side), not in the UI: the run's creator may never
/// approve their own run, and the review checklist must be acknowledged.
pub fn validate_approval(
    approver_id: DbId,
    created_by_id: DbId,
    checklist_acknowledged: bool,
) -> Result<(), CoreError> {
    if approver_id == created_by_id {
        return Err(CoreError::InvalidTransition {
            reason: "a payroll run cannot be approved by its creator".to_string(),
        });
    }
    if !checklist_acknowledged {
        return Err(CoreError::InvalidTransition {
            reason: "the review checklist must be acknowledged before approval".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::state_machine::*;
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn draft_can_compute_or_cancel() {
        assert!(can_transition(RunStatus::Draft, RunStatus::Computing));
        assert!(can_transition(RunStatus::Draft, RunStatus::Cancelled));
        assert!(!can_transition(RunStatus::Draft, RunStatus::Approved));
        assert!(!can_transition(RunStatus::Draft, RunStatus::Released));
    }

    #[test]
    fn computing_only_finishes_to_review() {
        assert_eq!(
            valid_transitions(RunStatus::Computing),
            &[RunStatus::Review],
        );
    }

    #[test]
    fn review_can_recompute_approve_or_cancel() {
        assert!(can_transition(RunStatus::Review, RunStatus::Computing));
        assert!(can_transition(RunStatus::Review, RunStatus::Approved));
        assert!(can_transition(RunStatus::Review, RunStatus::Cancelled));
        assert!(!can_transition(RunStatus::Review, RunStatus::Released));
    }

    #[test]
    fn approved_only_releases() {
        assert_eq!(valid_transitions(RunStatus::Approved), &[RunStatus::Released]);
        assert!(!can_transition(RunStatus::Approved, RunStatus::Cancelled));
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(valid_transitions(RunStatus::Released).is_empty());
        assert!(valid_transitions(RunStatus::Cancelled).is_empty());
        assert!(RunStatus::Released.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
    }

    #[test]
    fn invalid_transition_carries_edge_in_reason() {
        let err = validate_transition(RunStatus::Draft, RunStatus::Approved).unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidTransition { reason } if reason == "draft -> approved"
        );
    }

    #[test]
    fn concurrent_compute_is_rejected_not_queued() {
        // A run already Computing rejects another compute request.
        assert!(!can_transition(RunStatus::Computing, RunStatus::Computing));
    }

    #[test]
    fn creator_cannot_approve_own_run() {
        let err = validate_approval(7, 7, true).unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition { .. });
    }

    #[test]
    fn approval_requires_checklist() {
        let err = validate_approval(8, 7, false).unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition { .. });
        assert!(validate_approval(8, 7, true).is_ok());
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            RunStatus::Draft,
            RunStatus::Computing,
            RunStatus::Review,
            RunStatus::Approved,
            RunStatus::Released,
            RunStatus::Cancelled,
        ] {
            assert_eq!(RunStatus::parse(status.as_str()).unwrap(), status);
        }
    }
}

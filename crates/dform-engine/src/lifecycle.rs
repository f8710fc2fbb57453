//! Form lifecycle
//!
//! ```text
//! Initial ──► Editing ◄──► Editing
//!    │           │
//!    └──► Validating ◄──┐
//!            │    │     │
//!      Submitted  Rejected ──► Editing
//! ```
//!
//! `Submitted` is terminal. `Validating → Editing` is only taken when the
//! hand-off store fails after a successful validation.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Phase of one form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormPhase {
    /// Defaults seeded, nothing edited yet
    Initial,
    /// At least one edit since mount or rejection
    Editing,
    /// Submission in progress
    Validating,
    /// Value set handed off
    Submitted,
    /// Last submission had field errors
    Rejected,
}

impl FormPhase {
    /// Whether no further transition is possible
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        allowed_transitions(self).is_empty()
    }
}

/// Phases reachable from `from`
#[must_use]
pub fn allowed_transitions(from: FormPhase) -> &'static [FormPhase] {
    use FormPhase::*;
    match from {
        Initial => &[Editing, Validating],
        Editing => &[Editing, Validating],
        Validating => &[Submitted, Rejected, Editing],
        Rejected => &[Editing, Validating],
        Submitted => &[],
    }
}

/// Validates a phase transition.
pub fn validate_transition(from: FormPhase, to: FormPhase) -> Result<(), EngineError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(EngineError::IllegalTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_is_terminal() {
        assert!(FormPhase::Submitted.is_terminal());
        assert!(!FormPhase::Rejected.is_terminal());
        assert!(validate_transition(FormPhase::Submitted, FormPhase::Editing).is_err());
    }

    #[test]
    fn rejected_returns_to_editing() {
        assert!(validate_transition(FormPhase::Rejected, FormPhase::Editing).is_ok());
        assert!(validate_transition(FormPhase::Rejected, FormPhase::Validating).is_ok());
    }

    #[test]
    fn submission_requires_validation() {
        assert!(validate_transition(FormPhase::Editing, FormPhase::Submitted).is_err());
        assert!(validate_transition(FormPhase::Initial, FormPhase::Validating).is_ok());
        assert!(validate_transition(FormPhase::Validating, FormPhase::Submitted).is_ok());
    }
}

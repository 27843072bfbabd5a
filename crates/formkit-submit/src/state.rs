//! Submission state machine.

use std::fmt;

/// Where a form is in its submit cycle.
///
/// ```text
/// Idle -> Validating -> Submitting -> Succeeded -> Idle
///             |              \-----> Failed ----> Idle
///             \-> Idle (invalid input)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Whether moving from `self` to `next` is a legal edge.
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::{Failed, Idle, Submitting, Succeeded, Validating};
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Legality rules for application status changes.
//!
//! The table below is the only place that decides whether a move is allowed. It is an
//! exhaustive match, so adding a status without deciding its destinations fails to compile.

use super::status::ApplicationStatus;

use ApplicationStatus::{Hired, Interview, Pending, Rejected, Reviewed, Shortlisted, Withdrawn};

/// Statuses reachable in a single step from `from`. Terminal statuses map to an empty slice.
pub const fn allowed_transitions(from: ApplicationStatus) -> &'static [ApplicationStatus] {
    match from {
        Pending => &[Reviewed, Shortlisted, Hired, Rejected, Withdrawn],
        Reviewed => &[Shortlisted, Interview, Rejected],
        Shortlisted => &[Interview, Hired, Rejected, Withdrawn],
        Interview => &[Hired, Rejected],
        Hired | Rejected | Withdrawn => &[],
    }
}

/// Whether `from -> to` is listed in the transition table. Same-status moves are not listed.
pub fn can_transition(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Text-level check used at loose boundaries. Unparseable input on either side is a refusal.
pub fn can_transition_labels(from: &str, to: &str) -> bool {
    match (ApplicationStatus::parse(from), ApplicationStatus::parse(to)) {
        (Ok(from), Ok(to)) => can_transition(from, to),
        _ => false,
    }
}

pub fn validate_transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<(), TransitionError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(TransitionError::InvalidTransition { from, to })
    }
}

/// Rejections raised before any record is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("invalid status transition from \"{from}\" to \"{to}\"")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("unknown application status \"{value}\"")]
    UnknownStatus { value: String },
}

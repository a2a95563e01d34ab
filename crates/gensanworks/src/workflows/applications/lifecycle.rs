use serde::Serialize;

use super::employment::{map_to_employment_status, EmploymentUpdate};
use super::referral::{map_to_referral_status, ReferralStatus};
use super::status::ApplicationStatus;
use super::transitions::{validate_transition, TransitionError};

/// A validated status move together with the derived values it implies.
///
/// Only [`plan_transition`] constructs plans, so holding one means the move was legal and the
/// referral and employment projections were computed from the same target status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionPlan {
    from: ApplicationStatus,
    to: ApplicationStatus,
    referral_status: ReferralStatus,
    employment: EmploymentUpdate,
}

impl TransitionPlan {
    pub fn from(&self) -> ApplicationStatus {
        self.from
    }

    pub fn to(&self) -> ApplicationStatus {
        self.to
    }

    pub fn referral_status(&self) -> ReferralStatus {
        self.referral_status
    }

    pub fn employment(&self) -> &EmploymentUpdate {
        &self.employment
    }
}

pub fn plan_transition(
    current: ApplicationStatus,
    requested: ApplicationStatus,
) -> Result<TransitionPlan, TransitionError> {
    validate_transition(current, requested)?;

    Ok(TransitionPlan {
        from: current,
        to: requested,
        referral_status: map_to_referral_status(requested),
        employment: map_to_employment_status(requested),
    })
}

/// Plan from raw status text. The stored side is parsed first so a corrupt record is reported
/// even when the request is also malformed.
pub fn plan_transition_labels(
    current: &str,
    requested: &str,
) -> Result<TransitionPlan, TransitionError> {
    let current = ApplicationStatus::parse(current)?;
    let requested = ApplicationStatus::parse(requested)?;
    plan_transition(current, requested)
}

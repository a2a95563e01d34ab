//! Job application lifecycle: transition rules, derived referral and employment statuses,
//! and the service that commits them together.
//!
//! The rule modules (`status`, `transitions`, `referral`, `employment`, `lifecycle`) are pure
//! and hold no state. Storage lives behind [`ApplicationRepository`]; the service never writes
//! the application without also writing the records derived from it.

pub mod domain;
pub mod employment;
pub mod lifecycle;
pub mod referral;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;
pub mod transitions;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantId, ApplicantRecord, ApplicationId, ApplicationRecord, ApplicationStatusView, JobId,
    ReferralId, ReferralRecord,
};
pub use employment::{
    employment_update_for_label, map_to_employment_status, EmploymentStatus, EmploymentUpdate,
};
pub use lifecycle::{plan_transition, plan_transition_labels, TransitionPlan};
pub use referral::{map_to_referral_status, referral_status_for_label, ReferralStatus};
pub use repository::{ApplicationRepository, CommittedTransition, RepositoryError, StatusCommit};
pub use router::{application_router, StatusUpdateRequest};
pub use service::{
    ApplicationLifecycleService, ApplicationServiceError, NewApplication, StatusUpdateOutcome,
    TransitionOptions,
};
pub use status::ApplicationStatus;
pub use transitions::{
    allowed_transitions, can_transition, can_transition_labels, validate_transition,
    TransitionError,
};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{
    ApplicantId, ApplicationId, ApplicationRecord, ApplicationStatusView, JobId, ReferralId,
    ReferralRecord,
};
use super::employment::{EmploymentStatus, EmploymentUpdate};
use super::lifecycle::plan_transition;
use super::referral::ReferralStatus;
use super::repository::{ApplicationRepository, RepositoryError, StatusCommit};
use super::status::ApplicationStatus;
use super::transitions::{allowed_transitions, TransitionError};

/// Orchestrates status updates: validate, derive, then commit all three records at once.
pub struct ApplicationLifecycleService<R> {
    repository: Arc<R>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Request to open a new application.
#[derive(Debug, Clone, Deserialize)]
pub struct NewApplication {
    pub applicant_id: ApplicantId,
    pub job_id: JobId,
    #[serde(default)]
    pub referral_id: Option<ReferralId>,
}

/// Result of `UpdateApplicationStatus`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateOutcome {
    pub application: ApplicationStatusView,
    pub previous_status: ApplicationStatus,
    pub referral_status: ReferralStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral: Option<ReferralRecord>,
    pub employment_update: EmploymentUpdate,
    pub applicant_employment_status: Option<EmploymentStatus>,
}

/// Current status with the statuses it may move to next.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOptions {
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
    pub allowed: &'static [ApplicationStatus],
}

impl<R> ApplicationLifecycleService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Open an application in `pending`, creating its referral record when it came from one.
    pub fn create(
        &self,
        request: NewApplication,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let now = Utc::now();
        let NewApplication {
            applicant_id,
            job_id,
            referral_id,
        } = request;

        require_present("applicant_id", &applicant_id.0)?;
        require_present("job_id", &job_id.0)?;
        if let Some(referral_id) = &referral_id {
            require_present("referral_id", &referral_id.0)?;
        }

        let (application_id, referral) = match referral_id {
            Some(referral_id) => {
                let application_id = ApplicationId::for_referral(&referral_id);
                let referral = ReferralRecord::pending(referral_id, application_id.clone(), now);
                (application_id, Some(referral))
            }
            None => (next_application_id(), None),
        };

        let record = ApplicationRecord::new(application_id, applicant_id, job_id, now);
        let stored = self.repository.insert(record, referral)?;
        info!(application_id = %stored.id.0, "application opened");
        Ok(stored)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn transition_options(
        &self,
        application_id: &ApplicationId,
    ) -> Result<TransitionOptions, ApplicationServiceError> {
        let record = self.get(application_id)?;
        Ok(TransitionOptions {
            application_id: record.id,
            status: record.status,
            allowed: allowed_transitions(record.status),
        })
    }

    /// Move an application to `requested` (free-form text) and resync its derived records.
    ///
    /// Nothing is written unless the move is legal and the stored status is still the one it
    /// was validated against when the commit lands.
    pub fn update_status(
        &self,
        application_id: &ApplicationId,
        requested: &str,
        notes: Option<String>,
    ) -> Result<StatusUpdateOutcome, ApplicationServiceError> {
        let requested = ApplicationStatus::parse(requested).inspect_err(|err| {
            warn!(application_id = %application_id.0, error = %err, "status update rejected");
        })?;

        let current = self.get(application_id)?;
        let plan = plan_transition(current.status, requested).inspect_err(|_| {
            warn!(
                application_id = %application_id.0,
                from = %current.status,
                to = %requested,
                "status update rejected"
            );
        })?;

        let notes = notes
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let committed = self.repository.commit_transition(StatusCommit {
            application_id: application_id.clone(),
            plan: plan.clone(),
            notes,
            at: Utc::now(),
        })?;

        info!(
            application_id = %application_id.0,
            from = %plan.from(),
            to = %plan.to(),
            referral_status = %plan.referral_status(),
            employment_changed = plan.employment().is_change(),
            "application status updated"
        );

        Ok(StatusUpdateOutcome {
            application: committed.application.status_view(),
            previous_status: plan.from(),
            referral_status: plan.referral_status(),
            referral: committed.referral,
            employment_update: plan.employment().clone(),
            applicant_employment_status: committed
                .applicant
                .and_then(|applicant| applicant.employment_status),
        })
    }
}

fn require_present(field: &'static str, value: &str) -> Result<(), ApplicationServiceError> {
    if value.trim().is_empty() {
        warn!(field, "application rejected: blank identifier");
        return Err(ApplicationServiceError::BlankField { field });
    }
    Ok(())
}

/// Error raised by the lifecycle service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

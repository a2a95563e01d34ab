use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    ApplicantId, ApplicantRecord, ApplicationId, ApplicationRecord, ReferralId, ReferralRecord,
};
use super::lifecycle::TransitionPlan;
use super::status::ApplicationStatus;

/// Storage abstraction over the application, referral, and applicant stores.
///
/// `commit_transition` must be atomic: implementations re-read the stored status inside the
/// same transaction (or lock) that writes the three records, and write nothing when it no
/// longer matches the status the plan was validated against.
pub trait ApplicationRepository: Send + Sync {
    fn insert(
        &self,
        application: ApplicationRecord,
        referral: Option<ReferralRecord>,
    ) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn fetch_referral(&self, id: &ReferralId) -> Result<Option<ReferralRecord>, RepositoryError>;
    fn fetch_applicant(
        &self,
        id: &ApplicantId,
    ) -> Result<Option<ApplicantRecord>, RepositoryError>;
    fn commit_transition(
        &self,
        commit: StatusCommit,
    ) -> Result<CommittedTransition, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("application status changed concurrently: expected \"{expected}\", found \"{actual}\"")]
    StaleStatus {
        expected: ApplicationStatus,
        actual: ApplicationStatus,
    },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Everything a backend needs to write one accepted transition.
#[derive(Debug, Clone)]
pub struct StatusCommit {
    pub application_id: ApplicationId,
    pub plan: TransitionPlan,
    pub notes: Option<String>,
    pub at: DateTime<Utc>,
}

impl StatusCommit {
    /// Compute the post-commit state of all three records from what is currently stored.
    ///
    /// Backends call this while holding their transaction so the stale-status check and the
    /// writes observe the same snapshot.
    pub fn apply(
        &self,
        application: &ApplicationRecord,
        referral: Option<&ReferralRecord>,
        applicant: Option<&ApplicantRecord>,
    ) -> Result<CommittedTransition, RepositoryError> {
        if application.status != self.plan.from() {
            return Err(RepositoryError::StaleStatus {
                expected: self.plan.from(),
                actual: application.status,
            });
        }

        let mut application = application.clone();
        application.status = self.plan.to();
        application.notes = self.notes.clone();
        application.updated_at = self.at;

        let referral = referral.map(|existing| ReferralRecord {
            referral_id: existing.referral_id.clone(),
            application_id: existing.application_id.clone(),
            status: self.plan.referral_status(),
            feedback: self.notes.clone().or_else(|| existing.feedback.clone()),
            updated_at: self.at,
        });

        let employment = self.plan.employment();
        let applicant = if employment.is_change() {
            Some(ApplicantRecord {
                applicant_id: application.applicant_id.clone(),
                employment_status: employment
                    .apply(applicant.and_then(|existing| existing.employment_status.as_ref())),
                updated_at: self.at,
            })
        } else {
            applicant.cloned()
        };

        Ok(CommittedTransition {
            application,
            referral,
            applicant,
        })
    }
}

/// The three records as written by a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommittedTransition {
    pub application: ApplicationRecord,
    pub referral: Option<ReferralRecord>,
    pub applicant: Option<ApplicantRecord>,
}

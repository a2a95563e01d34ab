use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::employment::EmploymentStatus;
use super::referral::{map_to_referral_status, ReferralStatus};
use super::status::ApplicationStatus;

const REFERRAL_APPLICATION_PREFIX: &str = "app_ref_";

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    /// Applications created from a PESO referral carry the referral id in their own id.
    pub fn for_referral(referral_id: &ReferralId) -> Self {
        Self(format!("{REFERRAL_APPLICATION_PREFIX}{}", referral_id.0))
    }

    pub fn referral_id(&self) -> Option<ReferralId> {
        self.0
            .strip_prefix(REFERRAL_APPLICATION_PREFIX)
            .filter(|rest| !rest.is_empty())
            .map(|rest| ReferralId(rest.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferralId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Source-of-truth application row. `status` is the only field the lifecycle writes besides
/// notes and the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn new(
        id: ApplicationId,
        applicant_id: ApplicantId,
        job_id: JobId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            applicant_id,
            job_id,
            status: ApplicationStatus::Pending,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.id.clone(),
            applicant_id: self.applicant_id.clone(),
            job_id: self.job_id.clone(),
            status: self.status.label(),
            referral_status: map_to_referral_status(self.status),
            terminal: self.status.is_terminal(),
            notes: self.notes.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// PESO-facing summary of a referred application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralRecord {
    pub referral_id: ReferralId,
    pub application_id: ApplicationId,
    pub status: ReferralStatus,
    pub feedback: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ReferralRecord {
    pub fn pending(
        referral_id: ReferralId,
        application_id: ApplicationId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            referral_id,
            application_id,
            status: ReferralStatus::Pending,
            feedback: None,
            updated_at: now,
        }
    }

    pub fn is_consistent_with(&self, status: ApplicationStatus) -> bool {
        self.status == map_to_referral_status(status)
    }
}

/// The slice of the applicant profile the lifecycle is allowed to touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub applicant_id: ApplicantId,
    pub employment_status: Option<EmploymentStatus>,
    pub updated_at: DateTime<Utc>,
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub job_id: JobId,
    pub status: &'static str,
    pub referral_status: ReferralStatus,
    pub terminal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

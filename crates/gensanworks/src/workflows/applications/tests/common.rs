use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::applications::domain::{
    ApplicantId, ApplicantRecord, ApplicationId, ApplicationRecord, JobId, ReferralId,
    ReferralRecord,
};
use crate::workflows::applications::employment::EmploymentStatus;
use crate::workflows::applications::repository::{
    ApplicationRepository, CommittedTransition, RepositoryError, StatusCommit,
};
use crate::workflows::applications::status::ApplicationStatus;
use crate::workflows::applications::{
    application_router, ApplicationLifecycleService, NewApplication,
};

#[derive(Default)]
struct MemoryState {
    applications: HashMap<ApplicationId, ApplicationRecord>,
    referrals: HashMap<ReferralId, ReferralRecord>,
    applicants: HashMap<ApplicantId, ApplicantRecord>,
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRepository {
    pub(super) fn seed_applicant(&self, applicant_id: &str, employment_status: &str) {
        let mut guard = self.state.lock().expect("lock");
        let applicant_id = ApplicantId(applicant_id.to_string());
        guard.applicants.insert(
            applicant_id.clone(),
            ApplicantRecord {
                applicant_id,
                employment_status: Some(EmploymentStatus::from(employment_status)),
                updated_at: Utc::now(),
            },
        );
    }

    pub(super) fn seed_referral(&self, referral_id: &str) {
        let mut guard = self.state.lock().expect("lock");
        let referral_id = ReferralId(referral_id.to_string());
        guard.referrals.insert(
            referral_id.clone(),
            ReferralRecord::pending(
                referral_id,
                ApplicationId("app-legacy".to_string()),
                Utc::now(),
            ),
        );
    }

    pub(super) fn force_status(&self, id: &ApplicationId, status: ApplicationStatus) {
        let mut guard = self.state.lock().expect("lock");
        if let Some(record) = guard.applications.get_mut(id) {
            record.status = status;
        }
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(
        &self,
        application: ApplicationRecord,
        referral: Option<ReferralRecord>,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.state.lock().expect("lock");
        if guard.applications.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        if let Some(referral) = referral {
            if guard.referrals.contains_key(&referral.referral_id) {
                return Err(RepositoryError::Conflict);
            }
            guard
                .referrals
                .insert(referral.referral_id.clone(), referral);
        }
        guard
            .applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.state.lock().expect("lock").applications.get(id).cloned())
    }

    fn fetch_referral(&self, id: &ReferralId) -> Result<Option<ReferralRecord>, RepositoryError> {
        Ok(self.state.lock().expect("lock").referrals.get(id).cloned())
    }

    fn fetch_applicant(
        &self,
        id: &ApplicantId,
    ) -> Result<Option<ApplicantRecord>, RepositoryError> {
        Ok(self.state.lock().expect("lock").applicants.get(id).cloned())
    }

    fn commit_transition(
        &self,
        commit: StatusCommit,
    ) -> Result<CommittedTransition, RepositoryError> {
        let mut guard = self.state.lock().expect("lock");
        let application = guard
            .applications
            .get(&commit.application_id)
            .ok_or(RepositoryError::NotFound)?;
        let referral = application
            .id
            .referral_id()
            .and_then(|referral_id| guard.referrals.get(&referral_id));
        let applicant = guard.applicants.get(&application.applicant_id);

        let committed = commit.apply(application, referral, applicant)?;

        guard.applications.insert(
            committed.application.id.clone(),
            committed.application.clone(),
        );
        if let Some(referral) = &committed.referral {
            guard
                .referrals
                .insert(referral.referral_id.clone(), referral.clone());
        }
        if let Some(applicant) = &committed.applicant {
            guard
                .applicants
                .insert(applicant.applicant_id.clone(), applicant.clone());
        }
        Ok(committed)
    }
}

/// Simulates a second request landing between validation and commit.
pub(super) struct RacingRepository {
    pub(super) inner: MemoryRepository,
    pub(super) concurrent_status: ApplicationStatus,
}

impl ApplicationRepository for RacingRepository {
    fn insert(
        &self,
        application: ApplicationRecord,
        referral: Option<ReferralRecord>,
    ) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(application, referral)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn fetch_referral(&self, id: &ReferralId) -> Result<Option<ReferralRecord>, RepositoryError> {
        self.inner.fetch_referral(id)
    }

    fn fetch_applicant(
        &self,
        id: &ApplicantId,
    ) -> Result<Option<ApplicantRecord>, RepositoryError> {
        self.inner.fetch_applicant(id)
    }

    fn commit_transition(
        &self,
        commit: StatusCommit,
    ) -> Result<CommittedTransition, RepositoryError> {
        self.inner
            .force_status(&commit.application_id, self.concurrent_status);
        self.inner.commit_transition(commit)
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(
        &self,
        _application: ApplicationRecord,
        _referral: Option<ReferralRecord>,
    ) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch_referral(
        &self,
        _id: &ReferralId,
    ) -> Result<Option<ReferralRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch_applicant(
        &self,
        _id: &ApplicantId,
    ) -> Result<Option<ApplicantRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn commit_transition(
        &self,
        _commit: StatusCommit,
    ) -> Result<CommittedTransition, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn new_application(applicant: &str) -> NewApplication {
    NewApplication {
        applicant_id: ApplicantId(applicant.to_string()),
        job_id: JobId("job-welder-0042".to_string()),
        referral_id: None,
    }
}

pub(super) fn referred_application(applicant: &str, referral: &str) -> NewApplication {
    NewApplication {
        referral_id: Some(ReferralId(referral.to_string())),
        ..new_application(applicant)
    }
}

pub(super) fn build_service() -> (
    ApplicationLifecycleService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ApplicationLifecycleService::new(repository.clone());
    (service, repository)
}

pub(super) fn application_router_with_service(
    service: ApplicationLifecycleService<MemoryRepository>,
) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) fn assert_bad_request(response: &Response) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use chrono::Utc;
use gensanworks::workflows::applications::{
    ApplicantId, ApplicantRecord, ApplicationId, ApplicationRecord, ApplicationRepository,
    CommittedTransition, EmploymentStatus, ReferralId, ReferralRecord, RepositoryError,
    StatusCommit,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct Tables {
    applications: HashMap<ApplicationId, ApplicationRecord>,
    referrals: HashMap<ReferralId, ReferralRecord>,
    applicants: HashMap<ApplicantId, ApplicantRecord>,
}

/// Process-local store. One mutex covers all three tables so a commit is a single critical
/// section: the stale-status check and the writes can never interleave with another commit.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryApplicationStore {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("application store lock poisoned".into()))
    }

    /// Register an applicant profile with a pre-existing employment status.
    pub(crate) fn register_applicant(
        &self,
        applicant_id: ApplicantId,
        employment_status: Option<EmploymentStatus>,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        tables.applicants.insert(
            applicant_id.clone(),
            ApplicantRecord {
                applicant_id,
                employment_status,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }
}

impl ApplicationRepository for InMemoryApplicationStore {
    fn insert(
        &self,
        application: ApplicationRecord,
        referral: Option<ReferralRecord>,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut tables = self.lock()?;
        if tables.applications.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        if let Some(referral) = referral {
            if tables.referrals.contains_key(&referral.referral_id) {
                return Err(RepositoryError::Conflict);
            }
            tables
                .referrals
                .insert(referral.referral_id.clone(), referral);
        }
        tables
            .applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.lock()?.applications.get(id).cloned())
    }

    fn fetch_referral(&self, id: &ReferralId) -> Result<Option<ReferralRecord>, RepositoryError> {
        Ok(self.lock()?.referrals.get(id).cloned())
    }

    fn fetch_applicant(
        &self,
        id: &ApplicantId,
    ) -> Result<Option<ApplicantRecord>, RepositoryError> {
        Ok(self.lock()?.applicants.get(id).cloned())
    }

    fn commit_transition(
        &self,
        commit: StatusCommit,
    ) -> Result<CommittedTransition, RepositoryError> {
        let mut tables = self.lock()?;
        let committed = {
            let application = tables
                .applications
                .get(&commit.application_id)
                .ok_or(RepositoryError::NotFound)?;
            let referral = application
                .id
                .referral_id()
                .and_then(|referral_id| tables.referrals.get(&referral_id));
            let applicant = tables.applicants.get(&application.applicant_id);
            commit.apply(application, referral, applicant)?
        };

        tables.applications.insert(
            committed.application.id.clone(),
            committed.application.clone(),
        );
        if let Some(referral) = &committed.referral {
            tables
                .referrals
                .insert(referral.referral_id.clone(), referral.clone());
        }
        if let Some(applicant) = &committed.applicant {
            tables
                .applicants
                .insert(applicant.applicant_id.clone(), applicant.clone());
        }

        Ok(committed)
    }
}

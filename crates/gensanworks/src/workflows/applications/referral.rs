use std::fmt;

use serde::{Deserialize, Serialize};

use super::status::ApplicationStatus;

/// Outcome bucket reported on the PESO referral record.
///
/// Internal review stages collapse into `Pending`; only the interview and final outcomes are
/// visible to the referral audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferralStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "For Interview")]
    ForInterview,
    #[serde(rename = "Hired")]
    Hired,
    #[serde(rename = "Rejected")]
    Rejected,
}

impl ReferralStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReferralStatus::Pending => "Pending",
            ReferralStatus::ForInterview => "For Interview",
            ReferralStatus::Hired => "Hired",
            ReferralStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ReferralStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const fn map_to_referral_status(status: ApplicationStatus) -> ReferralStatus {
    match status {
        ApplicationStatus::Hired => ReferralStatus::Hired,
        ApplicationStatus::Interview => ReferralStatus::ForInterview,
        ApplicationStatus::Rejected => ReferralStatus::Rejected,
        ApplicationStatus::Pending
        | ApplicationStatus::Reviewed
        | ApplicationStatus::Shortlisted
        | ApplicationStatus::Withdrawn => ReferralStatus::Pending,
    }
}

/// Referral projection of stored status text. Unrecognized text still reads as `Pending`.
pub fn referral_status_for_label(status: &str) -> ReferralStatus {
    ApplicationStatus::parse(status)
        .map(map_to_referral_status)
        .unwrap_or(ReferralStatus::Pending)
}

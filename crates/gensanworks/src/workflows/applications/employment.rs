use std::fmt;

use serde::{Deserialize, Serialize};

use super::status::ApplicationStatus;

/// Employment status stored on an applicant profile.
///
/// Profiles carry values beyond the two the lifecycle writes (e.g. "Self-Employed",
/// "New Entrant"); those are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    Other(String),
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EmploymentStatus::Employed => "Employed",
            EmploymentStatus::Unemployed => "Unemployed",
            EmploymentStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EmploymentStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "employed" => EmploymentStatus::Employed,
            "unemployed" => EmploymentStatus::Unemployed,
            _ => EmploymentStatus::Other(value),
        }
    }
}

impl From<&str> for EmploymentStatus {
    fn from(value: &str) -> Self {
        EmploymentStatus::from(value.to_string())
    }
}

impl From<EmploymentStatus> for String {
    fn from(status: EmploymentStatus) -> Self {
        match status {
            EmploymentStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// What the applicant store must do with its employment status after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum EmploymentUpdate {
    Set(EmploymentStatus),
    NoChange,
}

impl EmploymentUpdate {
    pub fn is_change(&self) -> bool {
        matches!(self, EmploymentUpdate::Set(_))
    }

    /// Value the profile holds once the update is applied to `current`.
    pub fn apply(&self, current: Option<&EmploymentStatus>) -> Option<EmploymentStatus> {
        match self {
            EmploymentUpdate::Set(status) => Some(status.clone()),
            EmploymentUpdate::NoChange => current.cloned(),
        }
    }
}

pub fn map_to_employment_status(status: ApplicationStatus) -> EmploymentUpdate {
    match status {
        ApplicationStatus::Hired => EmploymentUpdate::Set(EmploymentStatus::Employed),
        ApplicationStatus::Rejected | ApplicationStatus::Withdrawn => {
            EmploymentUpdate::Set(EmploymentStatus::Unemployed)
        }
        ApplicationStatus::Pending
        | ApplicationStatus::Reviewed
        | ApplicationStatus::Shortlisted
        | ApplicationStatus::Interview => EmploymentUpdate::NoChange,
    }
}

pub fn employment_update_for_label(status: &str) -> EmploymentUpdate {
    ApplicationStatus::parse(status)
        .map(map_to_employment_status)
        .unwrap_or(EmploymentUpdate::NoChange)
}

// Application Domain Model
//
// A worker's request to fill a Job, carrying its own acceptance status.
// Stored alongside the job in the realtime store, read via a point query.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::Accepted => write!(f, "accepted"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub applicant_id: String,
    pub status: ApplicationStatus,

    // Counter-offer fields proposed by the worker
    pub proposed_start_of_shift: Option<i64>,
    pub proposed_end_of_shift: Option<i64>,
    pub proposed_pay_rate: Option<String>,

    pub applied_at: Option<i64>,
}

impl Application {
    /// New pending application with no counter-offer
    pub fn pending(applicant_id: impl Into<String>, applied_at: i64) -> Self {
        Self {
            applicant_id: applicant_id.into(),
            status: ApplicationStatus::Pending,
            proposed_start_of_shift: None,
            proposed_end_of_shift: None,
            proposed_pay_rate: None,
            applied_at: Some(applied_at),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == ApplicationStatus::Accepted
    }
}

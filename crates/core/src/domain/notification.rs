// Notification Domain Model

use crate::domain::{Job, JobId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    JobAutoClosed,
}

/// A stored notification record addressed to one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub recipient_id: String,
    pub job_id: JobId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: i64,
}

impl Notification {
    /// Notification sent to the business owner when the scheduler closes a job
    pub fn job_auto_closed(id: String, job: &Job, now_millis: i64) -> Self {
        Self {
            id,
            recipient_id: job.business_owner_id.clone(),
            job_id: job.id.clone(),
            kind: NotificationKind::JobAutoClosed,
            message: format!(
                "Applications for '{}' were closed automatically ahead of the shift start",
                job.title
            ),
            created_at: now_millis,
        }
    }
}

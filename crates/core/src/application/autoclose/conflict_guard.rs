// Conflict Guard - race-avoidance check before auto-closing a job
//
// The sole mechanism preventing the scheduler from closing a job out from
// under a worker who was just accepted.

use crate::domain::{Application, JobId};
use crate::error::Result;
use crate::port::ApplicationReader;
use std::sync::Arc;

pub struct ConflictGuard {
    applications: Arc<dyn ApplicationReader>,
}

impl ConflictGuard {
    pub fn new(applications: Arc<dyn ApplicationReader>) -> Self {
        Self { applications }
    }

    /// True when at least one application on the job is already Accepted.
    ///
    /// An empty application set does not block. A read failure propagates as
    /// Err; the scheduler treats it fail-closed (skip the closure this cycle
    /// and let the next cycle retry naturally).
    pub async fn blocks_closure(&self, job_id: &JobId) -> Result<bool> {
        let applications = self.applications.applications_for(job_id).await?;
        Ok(applications.iter().any(Application::is_accepted))
    }
}

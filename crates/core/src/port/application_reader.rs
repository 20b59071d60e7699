// Application Reader Port

use crate::domain::{Application, JobId};
use crate::error::Result;
use async_trait::async_trait;

/// Point read of a job's application set, keyed by job id
#[async_trait]
pub trait ApplicationReader: Send + Sync {
    /// All applications attached to the job; empty when nobody applied.
    ///
    /// # Errors
    /// Store read failures propagate; callers deciding on closure must fail
    /// closed (do not close on an unreadable application set).
    async fn applications_for(&self, job_id: &JobId) -> Result<Vec<Application>>;
}

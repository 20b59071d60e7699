// Job Board Ports (read + write sides of the realtime store)

use crate::domain::{BusinessId, Job, JobClosure, JobId};
use crate::error::Result;
use async_trait::async_trait;

/// Read side: the global feed of job listings.
///
/// The scheduler reads one snapshot per evaluation cycle rather than holding
/// a live subscription; the presentation layer owns its own subscription.
#[async_trait]
pub trait JobFeed: Send + Sync {
    /// One-shot snapshot of every job listing currently in the store
    async fn snapshot(&self) -> Result<Vec<Job>>;
}

/// Write side: partial updates to stored job records.
///
/// A listing exists in two places upstream (the public listing and the owning
/// business's copy) and the two patches are NOT transactional. Callers must
/// treat a business-copy failure after a successful listing patch as a
/// monitored inconsistency.
#[async_trait]
pub trait JobWriter: Send + Sync {
    /// Patch the public listing record
    async fn patch_listing(&self, job_id: &JobId, closure: &JobClosure) -> Result<()>;

    /// Patch the owning business's copy of the listing
    async fn patch_business_copy(
        &self,
        business_id: &BusinessId,
        job_id: &JobId,
        closure: &JobClosure,
    ) -> Result<()>;
}

// In-memory port implementations for testing
//
// InMemoryBoard stands in for the managed realtime store across all four
// store ports. Failure injection toggles exercise the error-handling paths
// (fail-closed guard, non-transactional write inconsistency).

use crate::domain::{Application, BusinessId, Job, JobClosure, JobId, Notification};
use crate::error::{AppError, Result};
use crate::port::{ApplicationReader, IdProvider, JobFeed, JobWriter, NotificationSink, TimeProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// In-memory job board implementing every store port
#[derive(Default)]
pub struct InMemoryBoard {
    listings: RwLock<HashMap<JobId, Job>>,
    business_copies: RwLock<HashMap<(BusinessId, JobId), Job>>,
    applications: RwLock<HashMap<JobId, Vec<Application>>>,
    notifications: RwLock<Vec<Notification>>,

    // Failure injection
    fail_listing_writes: AtomicBool,
    fail_business_writes: AtomicBool,
    fail_application_reads: AtomicBool,
    fail_notification_inserts: AtomicBool,

    // Artificial snapshot latency (ms), for cycle-overlap tests
    snapshot_delay_ms: AtomicU64,
}

impl InMemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a job into both stored locations, as the posting flow does
    pub fn insert_job(&self, job: Job) {
        let key = (job.business_id.clone(), job.id.clone());
        self.business_copies
            .write()
            .unwrap()
            .insert(key, job.clone());
        self.listings.write().unwrap().insert(job.id.clone(), job);
    }

    pub fn insert_application(&self, job_id: impl Into<JobId>, application: Application) {
        self.applications
            .write()
            .unwrap()
            .entry(job_id.into())
            .or_default()
            .push(application);
    }

    pub fn job(&self, job_id: &str) -> Option<Job> {
        self.listings.read().unwrap().get(job_id).cloned()
    }

    pub fn business_copy(&self, business_id: &str, job_id: &str) -> Option<Job> {
        self.business_copies
            .read()
            .unwrap()
            .get(&(business_id.to_string(), job_id.to_string()))
            .cloned()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().unwrap().clone()
    }

    pub fn set_fail_listing_writes(&self, fail: bool) {
        self.fail_listing_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_business_writes(&self, fail: bool) {
        self.fail_business_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_application_reads(&self, fail: bool) {
        self.fail_application_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_notification_inserts(&self, fail: bool) {
        self.fail_notification_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn set_snapshot_delay(&self, delay: Duration) {
        self.snapshot_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

#[async_trait]
impl JobFeed for InMemoryBoard {
    async fn snapshot(&self) -> Result<Vec<Job>> {
        // Capture the point-in-time view first; the latency models a slow
        // transfer of that view, so concurrent readers see the same data
        let mut jobs: Vec<Job> = self.listings.read().unwrap().values().cloned().collect();
        // Deterministic order for tests
        jobs.sort_by(|a, b| a.id.cmp(&b.id));

        let delay_ms = self.snapshot_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        Ok(jobs)
    }
}

#[async_trait]
impl JobWriter for InMemoryBoard {
    async fn patch_listing(&self, job_id: &JobId, closure: &JobClosure) -> Result<()> {
        if self.fail_listing_writes.load(Ordering::SeqCst) {
            return Err(AppError::StoreWrite("injected listing write failure".to_string()));
        }

        let mut listings = self.listings.write().unwrap();
        let job = listings
            .get_mut(job_id)
            .ok_or_else(|| AppError::NotFound(format!("listing {}", job_id)))?;
        job.apply_closure(closure)?;
        Ok(())
    }

    async fn patch_business_copy(
        &self,
        business_id: &BusinessId,
        job_id: &JobId,
        closure: &JobClosure,
    ) -> Result<()> {
        if self.fail_business_writes.load(Ordering::SeqCst) {
            return Err(AppError::StoreWrite(
                "injected business copy write failure".to_string(),
            ));
        }

        let mut copies = self.business_copies.write().unwrap();
        let job = copies
            .get_mut(&(business_id.clone(), job_id.clone()))
            .ok_or_else(|| AppError::NotFound(format!("business copy {}/{}", business_id, job_id)))?;
        job.apply_closure(closure)?;
        Ok(())
    }
}

#[async_trait]
impl ApplicationReader for InMemoryBoard {
    async fn applications_for(&self, job_id: &JobId) -> Result<Vec<Application>> {
        if self.fail_application_reads.load(Ordering::SeqCst) {
            return Err(AppError::StoreRead(
                "injected application read failure".to_string(),
            ));
        }

        Ok(self
            .applications
            .read()
            .unwrap()
            .get(job_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl NotificationSink for InMemoryBoard {
    async fn insert(&self, notification: &Notification) -> Result<()> {
        if self.fail_notification_inserts.load(Ordering::SeqCst) {
            return Err(AppError::StoreWrite(
                "injected notification insert failure".to_string(),
            ));
        }

        self.notifications.write().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Fixed, manually advanced clock for deterministic tests
pub struct FixedTimeProvider {
    now: AtomicI64,
}

impl FixedTimeProvider {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
        }
    }

    pub fn advance(&self, delta_millis: i64) {
        self.now.fetch_add(delta_millis, Ordering::SeqCst);
    }
}

impl TimeProvider for FixedTimeProvider {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Sequential ID provider (notif-1, notif-2, ...) for deterministic tests
#[derive(Default)]
pub struct SequentialIdProvider {
    counter: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdProvider for SequentialIdProvider {
    fn generate_id(&self) -> String {
        format!("notif-{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

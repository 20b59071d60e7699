//! Job Lifecycle Scheduler
//!
//! Background process that closes job postings for applications as their
//! shift start approaches (30 minutes out), unless an applicant was already
//! accepted. One instance per host application, explicit start/stop, timer
//! driven; no process-wide singletons.

pub mod conflict_guard;
pub mod constants;
mod shutdown;

pub use conflict_guard::ConflictGuard;
pub use shutdown::{stop_channel, StopSender, StopToken};

use constants::*;

use crate::domain::{Job, JobClosure, JobStatus, Notification};
use crate::error::Result;
use crate::port::{ApplicationReader, IdProvider, JobFeed, JobWriter, NotificationSink, TimeProvider};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Evaluation cycle period
    pub period: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_POLL_PERIOD,
        }
    }
}

/// Introspection snapshot of a scheduler instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerStatus {
    pub active: bool,
    pub period: Duration,
}

/// Outcome counters of one evaluation cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Jobs read from the feed snapshot
    pub evaluated: usize,
    /// Jobs closed this cycle
    pub closed: usize,
    /// Jobs due for closure but blocked by an accepted application
    pub blocked: usize,
    /// Jobs due for closure where a read or the primary write failed
    pub failed: usize,
    /// True when the cycle was skipped because a previous one was still running
    pub skipped: bool,
}

impl CycleReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

/// Decide whether a job is due for auto-closure at `now_millis`.
///
/// Filled/Closed jobs and jobs carrying an accepted-applicant marker
/// short-circuit to false before the time check. A job with no shift start
/// is malformed for scheduling and never closed.
pub fn should_close(job: &Job, now_millis: i64) -> bool {
    if job.status != JobStatus::Open {
        return false;
    }
    if job.accepted_applicant.is_some() {
        return false;
    }
    match job.start_of_shift {
        Some(start) => start - CLOSE_LEAD_TIME_MS <= now_millis,
        None => {
            warn!(job_id = %job.id, "open job has no shift start, skipping auto-close evaluation");
            false
        }
    }
}

/// The background auto-close process.
///
/// State machine per instance: Stopped -> Running (start) -> Stopped (stop);
/// within Running, cycles repeat on a fixed period and never overlap.
pub struct JobLifecycleScheduler {
    runner: Arc<CycleRunner>,
    period: Mutex<Duration>,
    stop: Mutex<Option<StopSender>>,
}

impl JobLifecycleScheduler {
    pub fn new(
        feed: Arc<dyn JobFeed>,
        writer: Arc<dyn JobWriter>,
        applications: Arc<dyn ApplicationReader>,
        notifications: Arc<dyn NotificationSink>,
        time_provider: Arc<dyn TimeProvider>,
        id_provider: Arc<dyn IdProvider>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            runner: Arc::new(CycleRunner {
                feed,
                writer,
                notifications,
                guard: ConflictGuard::new(applications),
                time_provider,
                id_provider,
                active: AtomicBool::new(false),
                cycle_in_progress: AtomicBool::new(false),
                has_evaluated: AtomicBool::new(false),
            }),
            period: Mutex::new(config.period),
            stop: Mutex::new(None),
        }
    }

    /// Start the timer. Idempotent: a running scheduler ignores the call.
    ///
    /// The first start runs one immediate evaluation cycle before arming the
    /// repeating timer. Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut stop = lock(&self.stop);
        if stop.is_some() {
            info!("auto-close scheduler already running, start ignored");
            return;
        }

        self.runner.active.store(true, Ordering::SeqCst);
        let period = *lock(&self.period);
        *stop = Some(self.spawn_timer(period));
        info!(period_secs = period.as_secs(), "auto-close scheduler started");
    }

    /// Stop the timer and mark the process inactive.
    ///
    /// Cooperative only: an in-flight cycle finishes its writes, but no new
    /// cycle begins afterwards.
    pub fn stop(&self) {
        let mut stop = lock(&self.stop);
        match stop.take() {
            Some(sender) => {
                self.runner.active.store(false, Ordering::SeqCst);
                sender.stop();
                info!("auto-close scheduler stopped");
            }
            None => info!("auto-close scheduler not running, stop ignored"),
        }
    }

    /// Change the cycle period. While running, the timer is re-armed with the
    /// new period; the immediate first cycle is not repeated.
    pub fn set_period(&self, period: Duration) {
        // Lock order matches start(): stop handle first, then period
        let mut stop = lock(&self.stop);
        *lock(&self.period) = period;
        if let Some(sender) = stop.take() {
            sender.stop();
            *stop = Some(self.spawn_timer(period));
            info!(period_secs = period.as_secs(), "auto-close timer re-armed");
        }
    }

    pub fn is_active(&self) -> bool {
        self.runner.active.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> SchedulerStatus {
        SchedulerStatus {
            active: self.is_active(),
            period: *lock(&self.period),
        }
    }

    /// Manual trigger: run one evaluation cycle on demand, identical logic
    /// to a timer fire. Usable whether or not the timer is armed.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        self.runner.run_cycle().await
    }

    fn spawn_timer(&self, period: Duration) -> StopSender {
        let (sender, token) = stop_channel();
        let runner = Arc::clone(&self.runner);
        tokio::spawn(async move { runner.run_loop(period, token).await });
        sender
    }
}

/// Poisoned-lock recovery: the protected state is a plain handle/duration,
/// safe to reuse after a panic elsewhere.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct CycleRunner {
    feed: Arc<dyn JobFeed>,
    writer: Arc<dyn JobWriter>,
    notifications: Arc<dyn NotificationSink>,
    guard: ConflictGuard,
    time_provider: Arc<dyn TimeProvider>,
    id_provider: Arc<dyn IdProvider>,
    active: AtomicBool,
    cycle_in_progress: AtomicBool,
    has_evaluated: AtomicBool,
}

impl CycleRunner {
    async fn run_loop(self: Arc<Self>, period: Duration, mut stop: StopToken) {
        // First start evaluates immediately; a re-armed timer does not repeat it
        if !self.has_evaluated.load(Ordering::SeqCst) {
            if let Err(e) = self.run_cycle().await {
                error!(error = %e, "initial evaluation cycle failed");
            }
        }

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick completes immediately; consume it
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = stop.wait() => break,
                _ = ticker.tick() => {
                    // A fire already in flight when stop() ran must not act
                    if stop.is_stopped() || !self.active.load(Ordering::SeqCst) {
                        break;
                    }
                    if let Err(e) = self.run_cycle().await {
                        error!(error = %e, "evaluation cycle failed, retrying next period");
                    }
                }
            }
        }
        info!("auto-close timer loop exited");
    }

    async fn run_cycle(&self) -> Result<CycleReport> {
        // Cycles must not overlap: a slow cycle causes the next fire to skip
        if self.cycle_in_progress.swap(true, Ordering::SeqCst) {
            warn!("previous evaluation cycle still running, skipping this fire");
            return Ok(CycleReport::skipped());
        }

        let result = self.evaluate_all().await;
        self.cycle_in_progress.store(false, Ordering::SeqCst);
        self.has_evaluated.store(true, Ordering::SeqCst);
        result
    }

    async fn evaluate_all(&self) -> Result<CycleReport> {
        let now = self.time_provider.now_millis();
        let jobs = self.feed.snapshot().await?;

        let mut report = CycleReport::default();
        for job in jobs {
            report.evaluated += 1;
            if !should_close(&job, now) {
                continue;
            }

            match self.guard.blocks_closure(&job.id).await {
                Ok(true) => {
                    report.blocked += 1;
                    info!(
                        job_id = %job.id,
                        "accepted application present, auto-closure blocked"
                    );
                }
                Ok(false) => match self.close_job(&job, now).await {
                    Ok(()) => report.closed += 1,
                    Err(e) => {
                        report.failed += 1;
                        error!(
                            job_id = %job.id,
                            error = %e,
                            "auto-closure write failed, job left open"
                        );
                    }
                },
                Err(e) => {
                    // Fail closed: an unreadable application set never
                    // justifies closing; the next cycle retries naturally
                    report.failed += 1;
                    warn!(
                        job_id = %job.id,
                        error = %e,
                        "application set unreadable, deferring closure to next cycle"
                    );
                }
            }
        }

        info!(
            evaluated = report.evaluated,
            closed = report.closed,
            blocked = report.blocked,
            failed = report.failed,
            "evaluation cycle complete"
        );
        Ok(report)
    }

    /// Apply the closure to both stored records and notify the owner.
    ///
    /// The three writes are not transactional. A failed listing patch leaves
    /// the job open (returned as Err); failures after the listing patch
    /// succeeded leave the records inconsistent and are surfaced as monitored
    /// conditions, never silently swallowed.
    async fn close_job(&self, job: &Job, now: i64) -> Result<()> {
        let closure = JobClosure {
            auto_closed_at: now,
            reason: AUTO_CLOSE_REASON.to_string(),
        };

        self.writer.patch_listing(&job.id, &closure).await?;

        if let Err(e) = self
            .writer
            .patch_business_copy(&job.business_id, &job.id, &closure)
            .await
        {
            error!(
                job_id = %job.id,
                business_id = %job.business_id,
                error = %e,
                "public listing closed but business copy patch failed, records inconsistent"
            );
        }

        let notification =
            Notification::job_auto_closed(self.id_provider.generate_id(), job, now);
        if let Err(e) = self.notifications.insert(&notification).await {
            error!(
                job_id = %job.id,
                recipient_id = %job.business_owner_id,
                error = %e,
                "auto-closure notification insert failed"
            );
        }

        info!(
            job_id = %job.id,
            start_of_shift = ?job.start_of_shift,
            "job auto-closed ahead of shift start"
        );
        Ok(())
    }
}

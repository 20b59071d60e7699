//! Edge cases around cycle overlap, racing scheduler instances, malformed
//! records and feed failures.

use async_trait::async_trait;
use shiftmarket_core::application::autoclose::{JobLifecycleScheduler, SchedulerConfig};
use shiftmarket_core::application::discovery::{evaluate, DiscoveryParams};
use shiftmarket_core::domain::{Job, JobClosure, JobStatus};
use shiftmarket_core::error::AppError;
use shiftmarket_core::port::mocks::{FixedTimeProvider, InMemoryBoard, SequentialIdProvider};
use shiftmarket_core::port::JobFeed;
use std::sync::Arc;
use std::time::Duration;

const NOW: i64 = 1_000_000_000;
const MINUTE_MS: i64 = 60 * 1000;

fn scheduler(board: &Arc<InMemoryBoard>, clock: &Arc<FixedTimeProvider>) -> JobLifecycleScheduler {
    JobLifecycleScheduler::new(
        board.clone(),
        board.clone(),
        board.clone(),
        board.clone(),
        clock.clone(),
        Arc::new(SequentialIdProvider::new()),
        SchedulerConfig::default(),
    )
}

fn due_job(id: &str) -> Job {
    let mut job = Job::new_test("Barista");
    job.id = id.to_string();
    job.business_id = format!("biz-{}", id);
    job.start_of_shift = Some(NOW + 20 * MINUTE_MS);
    job.end_of_shift = Some(NOW + 8 * 60 * MINUTE_MS);
    job
}

#[tokio::test]
async fn test_overlapping_cycle_is_skipped() {
    let board = Arc::new(InMemoryBoard::new());
    let clock = Arc::new(FixedTimeProvider::new(NOW));
    board.insert_job(due_job("j1"));
    board.set_snapshot_delay(Duration::from_millis(100));

    let scheduler = Arc::new(scheduler(&board, &clock));

    let first = {
        let scheduler = scheduler.clone();
        tokio::spawn(async move { scheduler.run_cycle().await.unwrap() })
    };
    // Give the first cycle time to enter its snapshot read
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = {
        let scheduler = scheduler.clone();
        tokio::spawn(async move { scheduler.run_cycle().await.unwrap() })
    };

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    assert!(!first.skipped);
    assert!(second.skipped);
    assert_eq!(second.evaluated, 0);

    // The job was closed exactly once
    assert_eq!(board.job("j1").unwrap().status, JobStatus::Closed);
    assert_eq!(board.notifications().len(), 1);
}

#[tokio::test]
async fn test_racing_independent_instances_close_once() {
    // Two independent scheduler instances against the same store: both may
    // attempt the closure, but the status transition admits only one winner.
    let board = Arc::new(InMemoryBoard::new());
    let clock = Arc::new(FixedTimeProvider::new(NOW));
    board.insert_job(due_job("j1"));
    board.set_snapshot_delay(Duration::from_millis(50));

    let a = Arc::new(scheduler(&board, &clock));
    let b = Arc::new(scheduler(&board, &clock));

    let (ra, rb) = tokio::join!(
        {
            let a = a.clone();
            async move { a.run_cycle().await.unwrap() }
        },
        {
            let b = b.clone();
            async move { b.run_cycle().await.unwrap() }
        }
    );

    assert_eq!(ra.closed + rb.closed, 1, "exactly one closure wins");
    assert_eq!(ra.failed + rb.failed, 1, "the loser surfaces a failure");
    assert_eq!(board.job("j1").unwrap().status, JobStatus::Closed);
    assert_eq!(board.notifications().len(), 1);
}

#[tokio::test]
async fn test_malformed_record_does_not_abort_cycle_or_blank_list() {
    let board = Arc::new(InMemoryBoard::new());
    let clock = Arc::new(FixedTimeProvider::new(NOW));

    // No shift window at all
    let mut windowless = Job::new_test("Barista");
    windowless.id = "broken".to_string();
    board.insert_job(windowless);
    board.insert_job(due_job("good"));

    let scheduler = scheduler(&board, &clock);
    let report = scheduler.run_cycle().await.unwrap();

    assert_eq!(report.evaluated, 2);
    assert_eq!(report.closed, 1);
    assert_eq!(board.job("good").unwrap().status, JobStatus::Closed);
    assert_eq!(board.job("broken").unwrap().status, JobStatus::Open);

    // Discovery excludes the malformed record instead of erroring
    let snapshot = board.snapshot().await.unwrap();
    let result = evaluate(&snapshot, &DiscoveryParams::default());
    assert!(result.iter().all(|r| r.job.id != "broken"));
}

#[tokio::test]
async fn test_closed_job_is_never_reopened() {
    let mut job = due_job("j1");
    let closure = JobClosure {
        auto_closed_at: NOW,
        reason: "shift_start_imminent".to_string(),
    };
    job.apply_closure(&closure).unwrap();

    // A second closure attempt is an invalid transition, not a reopen
    assert!(job.apply_closure(&closure).is_err());
    assert_eq!(job.status, JobStatus::Closed);
}

struct BrokenFeed;

#[async_trait]
impl JobFeed for BrokenFeed {
    async fn snapshot(&self) -> shiftmarket_core::Result<Vec<Job>> {
        Err(AppError::StoreRead("feed unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_feed_failure_is_an_error_not_a_panic() {
    let board = Arc::new(InMemoryBoard::new());
    let clock = Arc::new(FixedTimeProvider::new(NOW));

    let scheduler = JobLifecycleScheduler::new(
        Arc::new(BrokenFeed),
        board.clone(),
        board.clone(),
        board.clone(),
        clock.clone(),
        Arc::new(SequentialIdProvider::new()),
        SchedulerConfig::default(),
    );

    let result = scheduler.run_cycle().await;
    assert!(matches!(result, Err(AppError::StoreRead(_))));

    // A later manual cycle still works (the in-progress guard was released)
    let scheduler = JobLifecycleScheduler::new(
        board.clone(),
        board.clone(),
        board.clone(),
        board.clone(),
        clock.clone(),
        Arc::new(SequentialIdProvider::new()),
        SchedulerConfig::default(),
    );
    board.insert_job(due_job("j1"));
    let report = scheduler.run_cycle().await.unwrap();
    assert_eq!(report.closed, 1);
}

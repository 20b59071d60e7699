// Job Domain Model
//
// A Job is a posted shift with a time window, pay rate, location and status.
// Records mirror the upstream realtime store (camelCase JSON, loosely typed),
// so temporal and spatial fields decode leniently: one malformed record must
// never blank a whole feed snapshot.

use serde::{Deserialize, Serialize};

/// Job ID (opaque string assigned by the store)
pub type JobId = String;

/// Business ID (owning business of a listing)
pub type BusinessId = String;

/// Job status. Monotonic: once Closed or Filled a job never reverts to Open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
    Filled,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Open => write!(f, "open"),
            JobStatus::Closed => write!(f, "closed"),
            JobStatus::Filled => write!(f, "filled"),
        }
    }
}

/// Business listing visibility. Listings written before the privacy field
/// existed carry no value and are treated as public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessPrivacy {
    Public,
    Private,
}

/// A geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Reference position used when the host has no geocoded location for the
    /// worker. Discovery still works, it is just geographically wrong.
    pub const FALLBACK: Coordinates = Coordinates {
        lat: 51.5074,
        lng: -0.1278,
    };
}

/// Where a shift takes place. lat/lng may be absent (listing was never
/// geocoded), in which case distance to the job is unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: String,
    pub city: String,
    pub postcode: String,
}

impl Location {
    /// Both coordinates, if the listing was geocoded
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            lat: self.lat?,
            lng: self.lng?,
        })
    }
}

/// Patch applied to a stored job record on auto-closure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobClosure {
    pub auto_closed_at: i64,
    pub reason: String,
}

/// Job Entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    #[serde(default)]
    pub title: String,
    pub status: JobStatus,

    // Ownership
    #[serde(default)]
    pub business_id: BusinessId,
    #[serde(default)]
    pub business_owner_id: String,
    pub business_privacy: Option<BusinessPrivacy>,

    // Temporal (epoch ms)
    pub start_of_shift: Option<i64>,
    pub end_of_shift: Option<i64>,
    pub created_at: Option<i64>,
    pub auto_closed_at: Option<i64>,
    pub closure_reason: Option<String>,

    // Economic: stored as text upstream, parsed on demand
    #[serde(default)]
    pub pay_rate: String,

    // Spatial
    #[serde(default)]
    pub location: Location,

    /// Marker set by the business accept flow once an applicant is accepted.
    /// The lifecycle scheduler short-circuits on it before any time check.
    pub accepted_applicant: Option<String>,
}

impl Job {
    /// Create a new open job listing
    ///
    /// # Arguments
    ///
    /// * `id` - Unique job ID (injected, not generated)
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    /// * `title` - Position title shown to workers
    /// * `business_id` - Owning business
    /// * `business_owner_id` - Account that receives closure notifications
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        title: impl Into<String>,
        business_id: impl Into<String>,
        business_owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: JobStatus::Open,
            business_id: business_id.into(),
            business_owner_id: business_owner_id.into(),
            business_privacy: None,
            start_of_shift: None,
            end_of_shift: None,
            created_at: Some(created_at),
            auto_closed_at: None,
            closure_reason: None,
            pay_rate: String::new(),
            location: Location::default(),
            accepted_applicant: None,
        }
    }

    /// Create a test job with deterministic ID and timestamp.
    ///
    /// Uses a simple counter (job-1, job-2, ...); timestamps start at 1000
    /// and increment by 1000.
    ///
    /// **Note**: This method should only be used in tests. Production code
    /// always injects IDs and time via providers.
    pub fn new_test(title: impl Into<String>) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        Self::new(
            format!("job-{}", counter),
            (counter * 1000) as i64,
            title,
            format!("biz-{}", counter),
            format!("owner-{}", counter),
        )
    }

    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }

    /// Absence of the privacy field predates the field and means public
    pub fn is_publicly_visible(&self) -> bool {
        !matches!(self.business_privacy, Some(BusinessPrivacy::Private))
    }

    /// A listing without both shift timestamps cannot be ranked or scheduled
    pub fn has_shift_window(&self) -> bool {
        self.start_of_shift.is_some() && self.end_of_shift.is_some()
    }

    /// Pay rate parsed as currency-per-hour. Unparsable, missing or negative
    /// values rank as zero rather than erroring.
    pub fn parsed_pay_rate(&self) -> f64 {
        self.pay_rate
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0)
    }

    /// Transition Open -> Closed with the closure patch applied.
    ///
    /// Any other starting status is an invalid transition: a Closed or Filled
    /// job must never be re-closed or reopened by the scheduler.
    pub fn apply_closure(&mut self, closure: &JobClosure) -> crate::domain::error::Result<()> {
        if self.status != JobStatus::Open {
            return Err(crate::domain::error::DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: JobStatus::Closed.to_string(),
            });
        }
        self.status = JobStatus::Closed;
        self.auto_closed_at = Some(closure.auto_closed_at);
        self.closure_reason = Some(closure.reason.clone());
        Ok(())
    }
}

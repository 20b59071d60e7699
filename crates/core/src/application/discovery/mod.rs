//! Job Discovery Pipeline
//!
//! Turns a raw feed snapshot into the worker-facing ranked job list:
//! annotate with distance, filter by the worker's constraints, rank.
//! Pure and deterministic in its inputs, so the presentation layer can
//! memoize the result per (snapshot, reference, filter, sort).

pub mod distance;
pub mod filter;
pub mod pipeline;
pub mod sort;

pub use distance::haversine_km;
pub use filter::FilterConfig;
pub use pipeline::{evaluate, DiscoveryParams};
pub use sort::SortMethod;

use crate::domain::Job;
use serde::Serialize;

/// A job annotated with its distance from the reference position.
///
/// The distance is derived per evaluation and never written back to the
/// store; the underlying feed snapshot is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedJob {
    pub job: Job,
    /// Kilometres from the reference position; None when either side has no
    /// coordinates ("unknown", which is not grounds for exclusion)
    pub distance_km: Option<f64>,
}

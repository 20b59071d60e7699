// Sort Engine - total orderings over the filtered job set
//
// A closed enum with one comparator per tag, resolved once per pipeline
// evaluation rather than re-dispatched per comparison. All orderings are
// stable: equal keys preserve the snapshot order.

use super::RankedJob;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ranking selected by the worker in the discovery view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMethod {
    /// Ascending distance; unknown distance after all known distances
    #[default]
    #[serde(rename = "closest")]
    Closest,
    /// Descending creation time; missing createdAt sorts last
    #[serde(rename = "newest")]
    Newest,
    /// Descending parsed pay rate; unparsable pay ranks as zero
    #[serde(rename = "highest")]
    HighestPay,
}

impl SortMethod {
    pub fn sort(self, jobs: &mut [RankedJob]) {
        match self {
            SortMethod::Closest => jobs.sort_by(compare_distance),
            SortMethod::Newest => jobs.sort_by(|a, b| {
                let a_created = a.job.created_at.unwrap_or(i64::MIN);
                let b_created = b.job.created_at.unwrap_or(i64::MIN);
                b_created.cmp(&a_created)
            }),
            SortMethod::HighestPay => {
                jobs.sort_by(|a, b| b.job.parsed_pay_rate().total_cmp(&a.job.parsed_pay_rate()))
            }
        }
    }
}

fn compare_distance(a: &RankedJob, b: &RankedJob) -> Ordering {
    match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        // Two unknown distances are equal-ranked; stable sort preserves
        // their prior relative order
        (None, None) => Ordering::Equal,
    }
}

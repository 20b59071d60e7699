// Filter Engine - conjunction of independent job predicates
//
// A job survives discovery iff ALL predicates hold. Each predicate with an
// empty/unconfigured constraint is a no-op, so the default config passes
// every open public job.

use super::RankedJob;
use crate::domain::Job;

/// Worker-chosen filter constraints for the discovery pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterConfig {
    /// Desired position substrings, matched case-insensitively against the title
    pub positions: Vec<String>,
    /// Desired city substrings, matched case-insensitively
    pub cities: Vec<String>,
    /// Maximum acceptable distance in kilometres
    pub max_distance_km: Option<f64>,
}

impl FilterConfig {
    /// Logical AND of every predicate; order-independent
    pub fn passes(&self, ranked: &RankedJob) -> bool {
        ranked.job.is_open()
            && ranked.job.is_publicly_visible()
            && self.matches_position(&ranked.job)
            && self.within_distance(ranked)
            && self.matches_city(&ranked.job)
    }

    fn matches_position(&self, job: &Job) -> bool {
        if self.positions.is_empty() {
            return true;
        }
        let title = job.title.to_lowercase();
        self.positions
            .iter()
            .any(|wanted| title.contains(&wanted.to_lowercase()))
    }

    /// Unknown distance passes: absence of information is not grounds for
    /// rejection.
    fn within_distance(&self, ranked: &RankedJob) -> bool {
        match (self.max_distance_km, ranked.distance_km) {
            (Some(max), Some(distance)) => distance <= max,
            _ => true,
        }
    }

    fn matches_city(&self, job: &Job) -> bool {
        if self.cities.is_empty() {
            return true;
        }
        let city = job.location.city.to_lowercase();
        self.cities
            .iter()
            .any(|wanted| city.contains(&wanted.to_lowercase()))
    }
}

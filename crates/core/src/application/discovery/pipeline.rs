// Discovery Pipeline - derive the ranked job list from a feed snapshot
//
// Pure, re-derivable view over (snapshot, reference, filter, sort). The
// snapshot is never mutated; distance annotations live only on the returned
// RankedJob records.

use super::{haversine_km, FilterConfig, RankedJob, SortMethod};
use crate::domain::{Coordinates, Job};
use tracing::warn;

/// The three variable inputs of a discovery evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryParams {
    /// Worker's reference position; None degrades distance annotation and
    /// distance ordering gracefully rather than erroring
    pub reference: Option<Coordinates>,
    pub filter: FilterConfig,
    pub sort: SortMethod,
}

/// Evaluate the pipeline: drop ineligible records, annotate with distance,
/// filter, rank. Deterministic in its inputs.
pub fn evaluate(snapshot: &[Job], params: &DiscoveryParams) -> Vec<RankedJob> {
    let mut ranked: Vec<RankedJob> = snapshot
        .iter()
        .filter(|job| job.is_open() && job.is_publicly_visible())
        .filter(|job| {
            if job.has_shift_window() {
                true
            } else {
                // One malformed record must not blank the whole list
                warn!(job_id = %job.id, "job missing shift window, excluded from discovery");
                false
            }
        })
        .map(|job| RankedJob {
            distance_km: annotate_distance(job, params.reference),
            job: job.clone(),
        })
        .filter(|ranked| params.filter.passes(ranked))
        .collect();

    params.sort.sort(&mut ranked);
    ranked
}

fn annotate_distance(job: &Job, reference: Option<Coordinates>) -> Option<f64> {
    let reference = reference?;
    let job_position = job.location.coordinates()?;
    Some(haversine_km(reference, job_position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusinessPrivacy, JobStatus};

    const REFERENCE: Coordinates = Coordinates { lat: 0.0, lng: 0.0 };

    /// Job with a shift window at roughly `km` kilometres east of REFERENCE
    /// (one degree of longitude at the equator is 111.19 km)
    fn job_at_km(id: &str, km: Option<f64>) -> Job {
        let mut job = Job::new_test("Barista");
        job.id = id.to_string();
        job.start_of_shift = Some(100_000);
        job.end_of_shift = Some(200_000);
        if let Some(km) = km {
            job.location.lat = Some(0.0);
            job.location.lng = Some(km / 111.1949);
        }
        job
    }

    fn ids(jobs: &[RankedJob]) -> Vec<&str> {
        jobs.iter().map(|r| r.job.id.as_str()).collect()
    }

    #[test]
    fn test_max_distance_with_unknown_distance_job() {
        // Jobs at [2.3, unknown, 7.1] km, max distance 5, sort closest:
        // the 7.1 km job is excluded, the unknown-distance job passes the
        // distance filter and sorts last.
        let snapshot = vec![
            job_at_km("near", Some(2.3)),
            job_at_km("nowhere", None),
            job_at_km("far", Some(7.1)),
        ];
        let params = DiscoveryParams {
            reference: Some(REFERENCE),
            filter: FilterConfig {
                max_distance_km: Some(5.0),
                ..Default::default()
            },
            sort: SortMethod::Closest,
        };

        let result = evaluate(&snapshot, &params);
        assert_eq!(ids(&result), vec!["near", "nowhere"]);
        assert_eq!(result[0].distance_km, Some(2.3));
        assert_eq!(result[1].distance_km, None);
    }

    #[test]
    fn test_drops_non_open_private_and_malformed() {
        let mut closed = job_at_km("closed", Some(1.0));
        closed.status = JobStatus::Closed;

        let mut filled = job_at_km("filled", Some(1.0));
        filled.status = JobStatus::Filled;

        let mut private = job_at_km("private", Some(1.0));
        private.business_privacy = Some(BusinessPrivacy::Private);

        let mut windowless = Job::new_test("Barista");
        windowless.id = "windowless".to_string();

        let snapshot = vec![
            closed,
            filled,
            private,
            windowless,
            job_at_km("visible", Some(1.0)),
        ];
        let result = evaluate(&snapshot, &DiscoveryParams::default());
        assert_eq!(ids(&result), vec!["visible"]);
    }

    #[test]
    fn test_no_reference_skips_distance_annotation() {
        let snapshot = vec![job_at_km("a", Some(3.0)), job_at_km("b", Some(1.0))];
        let params = DiscoveryParams {
            reference: None,
            filter: FilterConfig {
                max_distance_km: Some(2.0),
                ..Default::default()
            },
            sort: SortMethod::Closest,
        };

        // All distances unknown: nothing filtered out, snapshot order kept
        let result = evaluate(&snapshot, &params);
        assert_eq!(ids(&result), vec!["a", "b"]);
        assert!(result.iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn test_deterministic_and_snapshot_untouched() {
        let snapshot = vec![
            job_at_km("a", Some(5.5)),
            job_at_km("b", None),
            job_at_km("c", Some(0.5)),
        ];
        let original = snapshot.clone();
        let params = DiscoveryParams {
            reference: Some(REFERENCE),
            ..Default::default()
        };

        let first = evaluate(&snapshot, &params);
        let second = evaluate(&snapshot, &params);
        assert_eq!(first, second);
        assert_eq!(snapshot, original);
    }

    #[test]
    fn test_tightening_filters_never_grows_result() {
        let snapshot = vec![
            job_at_km("a", Some(1.0)),
            job_at_km("b", Some(4.0)),
            job_at_km("c", Some(9.0)),
        ];
        let reference = Some(REFERENCE);

        let loose = evaluate(
            &snapshot,
            &DiscoveryParams {
                reference,
                ..Default::default()
            },
        );
        let tighter = evaluate(
            &snapshot,
            &DiscoveryParams {
                reference,
                filter: FilterConfig {
                    max_distance_km: Some(5.0),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        let tightest = evaluate(
            &snapshot,
            &DiscoveryParams {
                reference,
                filter: FilterConfig {
                    max_distance_km: Some(5.0),
                    cities: vec!["nowhere".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
        );

        assert_eq!(loose.len(), 3);
        assert_eq!(tighter.len(), 2);
        assert_eq!(tightest.len(), 0);
    }

    #[test]
    fn test_empty_snapshot_is_empty_result() {
        assert!(evaluate(&[], &DiscoveryParams::default()).is_empty());
    }
}

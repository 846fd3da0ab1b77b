//! Property-based tests for cadence grouping.
//!
//! Uses proptest to verify:
//! 1. A job is in a bucket iff its `nextRun` contains one of the bucket's keywords.
//! 2. Each bucket preserves the relative input order of its jobs.
//! 3. No bucket holds more jobs than the input.
//! 4. A job containing "Daily" and "27" is in both the daily and monthly buckets.

use proptest::prelude::*;
use taskboard_proto::schedule::{
    Cadence, CadenceKeywords, ScheduledJob, group_by_cadence,
};

/// Fragments that include every default keyword plus near misses.
fn arb_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Daily".to_string()),
        Just("daily".to_string()),
        Just("Sunday".to_string()),
        Just("Weekly".to_string()),
        Just("Monthly".to_string()),
        Just("27".to_string()),
        Just("2".to_string()),
        Just("7".to_string()),
        Just("Jan 31".to_string()),
        Just("Jan".to_string()),
        Just(" at 9am".to_string()),
        "[a-z ]{0,8}",
    ]
}

/// Strategy for `nextRun` strings built from fragments.
fn arb_next_run() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_fragment(), 0..4).prop_map(|parts| parts.concat())
}

/// Strategy for job lists with unique, index-based names.
fn arb_jobs() -> impl Strategy<Value = Vec<ScheduledJob>> {
    prop::collection::vec((arb_next_run(), any::<bool>()), 0..24).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (next_run, enabled))| ScheduledJob {
                name: format!("job-{i}"),
                enabled,
                next_run,
                ..ScheduledJob::default()
            })
            .collect()
    })
}

fn index_of(name: &str) -> usize {
    name.trim_start_matches("job-").parse().unwrap()
}

proptest! {
    #[test]
    fn membership_matches_keywords(jobs in arb_jobs()) {
        let keywords = CadenceKeywords::default();
        let groups = group_by_cadence(&jobs, &keywords);
        for cadence in Cadence::ALL {
            let bucket = groups.bucket(cadence);
            for job in &jobs {
                let expected = keywords
                    .keywords(cadence)
                    .iter()
                    .any(|k| job.next_run.contains(k.as_str()));
                let present = bucket.iter().any(|j| j.name == job.name);
                prop_assert_eq!(present, expected, "job {:?} in {}", job.next_run, cadence);
            }
        }
    }

    #[test]
    fn buckets_preserve_input_order(jobs in arb_jobs()) {
        let groups = group_by_cadence(&jobs, &CadenceKeywords::default());
        for cadence in Cadence::ALL {
            let indices: Vec<usize> =
                groups.bucket(cadence).iter().map(|j| index_of(&j.name)).collect();
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]), "{} out of order: {:?}", cadence, indices);
        }
    }

    #[test]
    fn buckets_never_exceed_input(jobs in arb_jobs()) {
        let groups = group_by_cadence(&jobs, &CadenceKeywords::default());
        for cadence in Cadence::ALL {
            prop_assert!(groups.bucket(cadence).len() <= jobs.len());
        }
    }

    #[test]
    fn daily_and_27_lands_in_two_buckets(prefix in "[a-z ]{0,6}", suffix in "[a-z ]{0,6}") {
        let jobs = vec![ScheduledJob {
            name: "job-0".to_string(),
            next_run: format!("{prefix}Daily{suffix}27"),
            ..ScheduledJob::default()
        }];
        let groups = group_by_cadence(&jobs, &CadenceKeywords::default());
        prop_assert_eq!(groups.daily.len(), 1);
        prop_assert_eq!(groups.monthly.len(), 1);
    }
}

#[test]
fn no_keyword_means_no_bucket() {
    let jobs = vec![ScheduledJob {
        name: "job-0".to_string(),
        next_run: "Every other Tuesday".to_string(),
        ..ScheduledJob::default()
    }];
    let groups = group_by_cadence(&jobs, &CadenceKeywords::default());
    for cadence in Cadence::ALL {
        assert!(groups.bucket(cadence).is_empty());
    }
}

//! Scheduled job document types and cadence grouping.
//!
//! A job's cadence is never stored. It is derived at render time by
//! substring tests against the free-text `nextRun` field, so a job may land
//! in several buckets or in none.

use serde::{Deserialize, Serialize};

use crate::de::nullable;
use crate::meta::DocumentMeta;

/// A recurring job definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduledJob {
    /// Job name, used as its list key.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// What the job does.
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    /// Whether the job currently runs.
    #[serde(deserialize_with = "nullable")]
    pub enabled: bool,
    /// Raw schedule expression (usually cron syntax).
    #[serde(deserialize_with = "nullable")]
    pub schedule: String,
    /// Human description of the next run, e.g. `"Daily at 9am"`.
    #[serde(deserialize_with = "nullable")]
    pub next_run: String,
}

/// The schedules document: `{ jobs: [...], meta: {...} }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleDocument {
    /// Jobs in document order.
    #[serde(deserialize_with = "nullable")]
    pub jobs: Vec<ScheduledJob>,
    /// Document metadata.
    #[serde(deserialize_with = "nullable")]
    pub meta: DocumentMeta,
}

/// A derived cadence bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    /// Runs every day.
    Daily,
    /// Runs once a week.
    Weekly,
    /// Runs once a month.
    Monthly,
}

impl Cadence {
    /// All buckets in board display order.
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// Substrings that place a job in each cadence bucket.
///
/// Matching is case-sensitive. A job enters a bucket if its `nextRun`
/// contains any one of that bucket's keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceKeywords {
    /// Keywords for [`Cadence::Daily`].
    pub daily: Vec<String>,
    /// Keywords for [`Cadence::Weekly`].
    pub weekly: Vec<String>,
    /// Keywords for [`Cadence::Monthly`].
    pub monthly: Vec<String>,
}

impl Default for CadenceKeywords {
    fn default() -> Self {
        Self {
            daily: vec!["Daily".to_string()],
            weekly: vec!["Sunday".to_string(), "Weekly".to_string()],
            monthly: vec![
                "Monthly".to_string(),
                "27".to_string(),
                "Jan 31".to_string(),
            ],
        }
    }
}

impl CadenceKeywords {
    /// Returns the keyword set for a bucket.
    #[must_use]
    pub fn keywords(&self, cadence: Cadence) -> &[String] {
        match cadence {
            Cadence::Daily => &self.daily,
            Cadence::Weekly => &self.weekly,
            Cadence::Monthly => &self.monthly,
        }
    }

    /// Returns `true` if `next_run` contains any keyword of `cadence`.
    #[must_use]
    pub fn matches(&self, cadence: Cadence, next_run: &str) -> bool {
        self.keywords(cadence)
            .iter()
            .any(|keyword| next_run.contains(keyword.as_str()))
    }
}

/// Jobs partitioned into cadence buckets, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CadenceGroups<'a> {
    /// Jobs matching a daily keyword.
    pub daily: Vec<&'a ScheduledJob>,
    /// Jobs matching a weekly keyword.
    pub weekly: Vec<&'a ScheduledJob>,
    /// Jobs matching a monthly keyword.
    pub monthly: Vec<&'a ScheduledJob>,
}

impl<'a> CadenceGroups<'a> {
    /// Returns the jobs in a bucket.
    #[must_use]
    pub fn bucket(&self, cadence: Cadence) -> &[&'a ScheduledJob] {
        match cadence {
            Cadence::Daily => &self.daily,
            Cadence::Weekly => &self.weekly,
            Cadence::Monthly => &self.monthly,
        }
    }

    fn bucket_mut(&mut self, cadence: Cadence) -> &mut Vec<&'a ScheduledJob> {
        match cadence {
            Cadence::Daily => &mut self.daily,
            Cadence::Weekly => &mut self.weekly,
            Cadence::Monthly => &mut self.monthly,
        }
    }
}

/// Partitions jobs into daily, weekly, and monthly buckets.
///
/// Every bucket is tested for every job: a job whose `nextRun` matches two
/// keyword sets appears in both buckets, and one matching none is left out
/// of all three.
#[must_use]
pub fn group_by_cadence<'a>(
    jobs: &'a [ScheduledJob],
    keywords: &CadenceKeywords,
) -> CadenceGroups<'a> {
    let mut groups = CadenceGroups::default();
    for job in jobs {
        for cadence in Cadence::ALL {
            if keywords.matches(cadence, &job.next_run) {
                groups.bucket_mut(cadence).push(job);
            }
        }
    }
    groups
}

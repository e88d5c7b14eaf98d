//! Bucketing of free-text job-application statuses.
//!
//! `jobs.status` is free text written by operators; the source system never
//! enforced an enum on it. At query time it is pattern-matched into one of
//! six buckets so listings and summaries stay stable regardless of wording.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A reporting bucket for a job-application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobBucket {
    Saved,
    Applied,
    Interviewing,
    Offer,
    Rejected,
    Deleted,
}

/// All buckets, in reporting order.
pub const ALL_BUCKETS: &[JobBucket] = &[
    JobBucket::Saved,
    JobBucket::Applied,
    JobBucket::Interviewing,
    JobBucket::Offer,
    JobBucket::Rejected,
    JobBucket::Deleted,
];

impl JobBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            JobBucket::Saved => "saved",
            JobBucket::Applied => "applied",
            JobBucket::Interviewing => "interviewing",
            JobBucket::Offer => "offer",
            JobBucket::Rejected => "rejected",
            JobBucket::Deleted => "deleted",
        }
    }
}

impl fmt::Display for JobBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_BUCKETS
            .iter()
            .find(|bucket| bucket.as_str() == s)
            .copied()
            .ok_or_else(|| CoreError::Validation(format!("Invalid job bucket '{s}'")))
    }
}

/// Classify a free-text status into a bucket.
///
/// Matching is case-insensitive substring, checked in priority order so that
/// e.g. "offer rejected" lands in `rejected` and "deleted after offer" lands
/// in `deleted`. Anything unrecognised is `saved`.
pub fn bucket_for(status: &str) -> JobBucket {
    let lower = status.to_lowercase();

    if lower.contains("delete") {
        JobBucket::Deleted
    } else if lower.contains("reject") || lower.contains("declin") {
        JobBucket::Rejected
    } else if lower.contains("offer") {
        JobBucket::Offer
    } else if lower.contains("interview") || lower.contains("screen") {
        JobBucket::Interviewing
    } else if lower.contains("applied") || lower.contains("submit") {
        JobBucket::Applied
    } else {
        JobBucket::Saved
    }
}

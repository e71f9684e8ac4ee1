//! Read-model tuning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a refresh does when a query fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Drop the failed item and keep going. A failed count reads as zero.
    #[default]
    Omit,
    /// The first failure fails the whole refresh.
    FailFast,
}

/// How overlapping refreshes are reconciled in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Only the most recently started refresh may update the view.
    #[default]
    LatestIssued,
    /// Whichever refresh finishes last overwrites the view.
    LastCompleted,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "omit" => Ok(Self::Omit),
            "fail-fast" | "failfast" => Ok(Self::FailFast),
            other => Err(format!("unknown failure policy: {other}")),
        }
    }
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "latest-issued" | "latest" => Ok(Self::LatestIssued),
            "last-completed" | "last" => Ok(Self::LastCompleted),
            other => Err(format!("unknown conflict policy: {other}")),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Omit => "omit",
            Self::FailFast => "fail-fast",
        })
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LatestIssued => "latest-issued",
            Self::LastCompleted => "last-completed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Per-id queries in flight at once. `1` fetches strictly in sequence.
    pub max_concurrency: usize,
    pub failure_policy: FailurePolicy,
    /// Extra attempts for a failing per-id query.
    pub retries: u32,
    pub conflict_policy: ConflictPolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 1,
            failure_policy: FailurePolicy::Omit,
            retries: 0,
            conflict_policy: ConflictPolicy::LatestIssued,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sequential_and_lenient() {
        let cfg = SyncConfig::default();
        assert_eq!(cfg.max_concurrency, 1);
        assert_eq!(cfg.failure_policy, FailurePolicy::Omit);
        assert_eq!(cfg.retries, 0);
        assert_eq!(cfg.conflict_policy, ConflictPolicy::LatestIssued);
    }

    #[test]
    fn policies_parse_and_display() {
        assert_eq!("fail_fast".parse::<FailurePolicy>().unwrap(), FailurePolicy::FailFast);
        assert_eq!(
            "Last-Completed".parse::<ConflictPolicy>().unwrap(),
            ConflictPolicy::LastCompleted
        );
        assert!("sometimes".parse::<FailurePolicy>().is_err());
        assert_eq!(ConflictPolicy::LatestIssued.to_string(), "latest-issued");
        assert_eq!(FailurePolicy::FailFast.to_string(), "fail-fast");
    }
}

//! Vote totals and percentage shares derived from fetched counts.

use serde::{Deserialize, Serialize};

/// For/against counts of one proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub votes_for: u64,
    pub votes_against: u64,
}

impl Tally {
    pub fn new(votes_for: u64, votes_against: u64) -> Self {
        Self {
            votes_for,
            votes_against,
        }
    }

    pub fn total(&self) -> u64 {
        self.votes_for.saturating_add(self.votes_against)
    }

    /// Share of votes in favour, e.g. `"75.0"`.
    pub fn for_percentage(&self) -> String {
        format_percentage(self.votes_for, self.total())
    }

    /// Share of votes against, e.g. `"25.0"`.
    pub fn against_percentage(&self) -> String {
        format_percentage(self.votes_against, self.total())
    }

    /// Whether participation reached `quorum`. Informational only; the
    /// contract makes the binding decision.
    pub fn meets_quorum(&self, quorum: u64) -> bool {
        self.total() >= quorum
    }
}

/// `votes / total * 100` with one decimal place. A zero total yields `"0"`.
pub fn format_percentage(votes: u64, total: u64) -> String {
    if total == 0 {
        return "0".to_string();
    }
    format!("{:.1}", votes as f64 / total as f64 * 100.0)
}

//! Leaderboard aggregation.
//!
//! Reduces a snapshot of reports to one ranked entry per user. Ordering is
//! total: `totalScore` desc, `reportCount` desc, `alias` asc, `userId` asc,
//! so the output does not depend on the order of the input.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::storage::models::Report;

/// One user's aggregate standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub alias: String,
    pub total_score: u64,
    pub report_count: u64,
    pub rank: u32,
}

/// How ranks are assigned to entries that tie on `(totalScore, reportCount)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankPolicy {
    /// Rank is the 1-based position; ties get distinct ranks.
    #[default]
    Sequential,
    /// Ties share a rank and the next rank skips (1, 2, 2, 4).
    Competition,
}

/// Aggregate with sequential ranks.
pub fn aggregate(reports: &[Report]) -> Vec<LeaderboardEntry> {
    aggregate_with(reports, RankPolicy::Sequential)
}

pub fn aggregate_with(reports: &[Report], policy: RankPolicy) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for report in reports {
        let body = &report.body;
        match index.get(body.user_id.as_str()) {
            Some(&i) => {
                let entry = &mut entries[i];
                entry.total_score += u64::from(body.score);
                entry.report_count += 1;
            }
            None => {
                index.insert(body.user_id.as_str(), entries.len());
                entries.push(LeaderboardEntry {
                    user_id: body.user_id.clone(),
                    alias: body.alias.clone(),
                    total_score: u64::from(body.score),
                    report_count: 1,
                    rank: 0,
                });
            }
        }
    }

    entries.sort_by(compare_entries);
    assign_ranks(&mut entries, policy);

    log::debug!(
        "LEADERBOARD_AGGREGATED reports={} users={} policy={:?}",
        reports.len(),
        entries.len(),
        policy
    );

    entries
}

fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| b.report_count.cmp(&a.report_count))
        .then_with(|| a.alias.cmp(&b.alias))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

fn assign_ranks(entries: &mut [LeaderboardEntry], policy: RankPolicy) {
    let mut previous: Option<(u64, u64)> = None;
    let mut current_rank = 0;

    for (position, entry) in entries.iter_mut().enumerate() {
        let position = position as u32 + 1;
        let key = (entry.total_score, entry.report_count);
        current_rank = match policy {
            RankPolicy::Sequential => position,
            RankPolicy::Competition if previous == Some(key) => current_rank,
            RankPolicy::Competition => position,
        };
        entry.rank = current_rank;
        previous = Some(key);
    }
}

/// Find one user's entry, e.g. for a profile page.
pub fn entry_for<'a>(entries: &'a [LeaderboardEntry], user_id: &str) -> Option<&'a LeaderboardEntry> {
    entries.iter().find(|e| e.user_id == user_id)
}

//! Reporting utilities: per-group stats and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the cleaning/scoring code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use std::collections::BTreeMap;

use crate::domain::ScoredReview;

/// Aggregate sentiment stats for one (epoch, category) group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub epoch: String,
    pub category: String,
    pub count: usize,
    pub mean_rating: f64,
    pub mean_senti_ratio: f64,
    /// Reviews with zero lexicon matches (their 0.0 ratio is "no signal",
    /// not "neutral").
    pub unmatched: usize,
}

/// Group scored rows by (epoch, category) and compute means.
///
/// Groups come back in stable (alphabetical) order.
pub fn group_stats(rows: &[ScoredReview]) -> Vec<GroupStats> {
    let mut groups: BTreeMap<(String, String), Vec<&ScoredReview>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.epoch.clone(), row.category.clone()))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|((epoch, category), members)| {
            let count = members.len();
            let mean_rating = members.iter().map(|r| r.rating).sum::<f64>() / count as f64;
            let mean_senti_ratio =
                members.iter().map(|r| r.senti_ratio).sum::<f64>() / count as f64;
            let unmatched = members.iter().filter(|r| r.matched == 0).count();
            GroupStats {
                epoch,
                category,
                count,
                mean_rating,
                mean_senti_ratio,
                unmatched,
            }
        })
        .collect()
}

/// Format the full run summary (row counts + per-group sentiment).
pub fn format_run_summary(rows: &[ScoredReview], lexicon_words: usize) -> String {
    let mut out = String::new();

    out.push_str("=== senti - review sentiment ===\n");
    out.push_str(&format!("Reviews scored: {}\n", rows.len()));
    out.push_str(&format!("Lexicon words : {lexicon_words}\n"));

    out.push_str("\nGroups:\n");
    for group in group_stats(rows) {
        out.push_str(&format!(
            "  {:<12} {:<14} n={:<5} rating={:.2} senti={:+.4} unmatched={}\n",
            group.epoch,
            group.category,
            group.count,
            group.mean_rating,
            group.mean_senti_ratio,
            group.unmatched
        ));
    }

    out
}

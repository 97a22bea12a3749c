use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use crate::hand_evaluator::HandRank;

static HAND_PROBABILITIES_JSON: &str = include_str!("../data/hand_probabilities.json");

/// Real-world occurrence of each five-card rank, in percent. Display only.
static PROBABILITIES: Lazy<BTreeMap<HandRank, f64>> = Lazy::new(|| {
    let raw: HashMap<String, f64> =
        serde_json::from_str(HAND_PROBABILITIES_JSON).expect("Failed to parse hand probabilities");
    raw.into_iter()
        .filter_map(|(name, pct)| HandRank::from_name(&name).map(|rank| (rank, pct)))
        .collect()
});

/// Occurrence percentage for `rank`, `0.0` if the table has no entry.
pub fn probability(rank: HandRank) -> f64 {
    PROBABILITIES.get(&rank).copied().unwrap_or(0.0)
}

/// "1 in N" odds for `rank`.
pub fn one_in(rank: HandRank) -> Option<f64> {
    let pct = probability(rank);
    if pct > 0.0 {
        Some(100.0 / pct)
    } else {
        None
    }
}

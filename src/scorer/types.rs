use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Penalties {
    pub same_hand: f64,
    pub missing: f64,
    pub same_finger: f64,
}

impl Default for Penalties {
    fn default() -> Self {
        Penalties {
            same_hand: 0.0,
            missing: 5.0,
            same_finger: 1.0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreDetails {
    // Top-line Score
    pub layout_score: f64,

    // Weighted Cost Components (sum to layout_score)
    pub effort_cost: f64,
    pub same_hand_cost: f64,
    pub same_finger_cost: f64,
    pub missing_cost: f64,

    // === STATISTICAL COUNTERS (Raw Transition Counts) ===
    pub total_transitions: u64,
    pub scored_transitions: u64,
    pub skipped_transitions: u64, // Non-alphabetic keys
    pub stat_same_hand: u64,
    pub stat_same_finger: u64,
    pub stat_missing: u64,
}

impl ScoreDetails {
    pub fn pct_of_scored(&self, count: u64) -> f64 {
        if self.scored_transitions > 0 {
            count as f64 / self.scored_transitions as f64 * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRanking {
    pub name: String,
    pub layout: String,
    pub score: f64,
    /// Percentage above the best-scoring entry of the same ranking.
    pub delta_pct: f64,
}

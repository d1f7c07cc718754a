use super::costs::{calculate_transition_cost, CostCategory};
use super::{ScoreDetails, Scorer};
use crate::geometry::Geometry;
use crate::model::FrequencyModel;

/// Fast Path: Used by the Optimizer.
pub fn score_full(scorer: &Scorer, geom: &Geometry, model: &FrequencyModel) -> f64 {
    let mut score = 0.0;
    for (t, count) in model.iter() {
        if let Some(cost) = calculate_transition_cost(geom, &scorer.penalties, t.prev, t.key) {
            score += cost.unit() * count as f64;
        }
    }
    score
}

/// Detailed Path: Used by Validation.
pub fn score_details(scorer: &Scorer, geom: &Geometry, model: &FrequencyModel) -> ScoreDetails {
    let mut d = ScoreDetails::default();

    for (t, count) in model.iter() {
        d.total_transitions = d.total_transitions.saturating_add(count);

        let cost = match calculate_transition_cost(geom, &scorer.penalties, t.prev, t.key) {
            Some(c) => c,
            None => {
                d.skipped_transitions = d.skipped_transitions.saturating_add(count);
                continue;
            }
        };

        let freq = count as f64;
        d.scored_transitions = d.scored_transitions.saturating_add(count);
        // Same accumulation as score_full so the totals agree exactly.
        d.layout_score += cost.unit() * freq;

        match cost.category {
            CostCategory::Missing => {
                d.stat_missing = d.stat_missing.saturating_add(count);
                d.missing_cost += cost.missing * freq;
            }
            CostCategory::Placed => {
                d.effort_cost += cost.effort * freq;
                if cost.same_hand > 0.0 {
                    d.same_hand_cost += cost.same_hand * freq;
                }
                if cost.same_finger > 0.0 {
                    d.same_finger_cost += cost.same_finger * freq;
                }
                if let Some(prev) = t.prev {
                    if geom.same_hand(prev, t.key) {
                        d.stat_same_hand = d.stat_same_hand.saturating_add(count);
                    }
                    if prev != t.key && geom.same_column(prev, t.key) {
                        d.stat_same_finger = d.stat_same_finger.saturating_add(count);
                    }
                }
            }
        }
    }

    d
}

use super::types::Penalties;
use crate::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostCategory {
    Placed,
    Missing,
}

/// Unit cost of one transition, split into its parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostResult {
    pub category: CostCategory,
    pub effort: f64,
    pub same_hand: f64,
    pub same_finger: f64,
    pub missing: f64,
}

impl CostResult {
    #[inline(always)]
    pub fn unit(&self) -> f64 {
        match self.category {
            CostCategory::Missing => self.missing,
            CostCategory::Placed => self.effort + self.same_hand + self.same_finger,
        }
    }
}

/// Returns `None` for keys the effort grid does not model (anything non-alphabetic).
pub fn calculate_transition_cost(
    geom: &Geometry,
    p: &Penalties,
    prev: Option<char>,
    key: char,
) -> Option<CostResult> {
    if !key.is_alphabetic() {
        return None;
    }

    let effort = match geom.effort_of(key) {
        Some(e) => e,
        None => {
            return Some(CostResult {
                category: CostCategory::Missing,
                effort: 0.0,
                same_hand: 0.0,
                same_finger: 0.0,
                missing: p.missing,
            })
        }
    };

    let mut res = CostResult {
        category: CostCategory::Placed,
        effort,
        same_hand: 0.0,
        same_finger: 0.0,
        missing: 0.0,
    };

    if let Some(last) = prev {
        if geom.same_hand(last, key) {
            res.same_hand = p.same_hand;
        }
        if last != key && geom.same_column(last, key) {
            res.same_finger = p.same_finger;
        }
    }

    Some(res)
}

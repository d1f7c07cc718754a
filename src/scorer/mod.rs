pub mod costs;
pub mod engine;
pub mod ranking;
pub mod types;

pub use self::ranking::{percent_delta, rank_layouts, write_rankings_csv};
pub use self::types::{LayoutRanking, Penalties, ScoreDetails};
use crate::config::ScoringWeights;
use crate::error::KfResult;
use crate::geometry::{EffortGrid, Geometry, Layout};
use crate::model::FrequencyModel;

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    pub penalties: Penalties,
    pub effort: EffortGrid,
}

impl Scorer {
    pub fn new(penalties: Penalties, effort: EffortGrid) -> Self {
        Self { penalties, effort }
    }

    pub fn from_weights(weights: &ScoringWeights) -> KfResult<Self> {
        weights.validate()?;
        Ok(Self::new(weights.penalties(), weights.get_effort_grid()?))
    }

    pub fn geometry(&self, layout: &Layout) -> Geometry {
        Geometry::derive(layout, &self.effort)
    }

    /// Count-weighted cost of typing the model on `layout`. Lower is better.
    pub fn score(&self, layout: &Layout, model: &FrequencyModel) -> f64 {
        engine::score_full(self, &self.geometry(layout), model)
    }

    pub fn score_geometry(&self, geom: &Geometry, model: &FrequencyModel) -> f64 {
        engine::score_full(self, geom, model)
    }

    /// Detailed scoring for the validation report (Rich Data)
    pub fn score_details(&self, layout: &Layout, model: &FrequencyModel) -> ScoreDetails {
        engine::score_details(self, &self.geometry(layout), model)
    }
}

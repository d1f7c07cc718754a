pub mod mutation;
pub mod runner;

pub use self::runner::{
    CancelToken, Optimizer, SearchObserver, SearchOptions, SearchReport, StopReason,
};

use crate::geometry::Layout;
use crate::model::FrequencyModel;
use crate::scorer::{percent_delta, Scorer};
use fastrand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Outcome of one search iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    /// The candidate beat the best score and was adopted.
    Improvement {
        score: f64,
        /// Change relative to the starting score (negative when better).
        delta_pct: f64,
        layout: Layout,
    },
    /// The candidate had been scored before.
    Duplicate,
    NoImprovement {
        score: f64,
    },
    /// Both slot draws hit the same slot.
    DegenerateDraw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub iterations: u64,
    pub improvements: u64,
    pub duplicates: u64,
    pub no_improvements: u64,
    pub degenerate_draws: u64,
}

impl SearchStats {
    fn record(&mut self, event: &SearchEvent) {
        self.iterations += 1;
        match event {
            SearchEvent::Improvement { .. } => self.improvements += 1,
            SearchEvent::Duplicate => self.duplicates += 1,
            SearchEvent::NoImprovement { .. } => self.no_improvements += 1,
            SearchEvent::DegenerateDraw => self.degenerate_draws += 1,
        }
    }
}

/// Greedy swap-based hill climber.
///
/// Owns the only mutable search state: the best layout and score, and the
/// set of layouts already scored. `best_score` never increases.
pub struct Climber {
    pub scorer: Arc<Scorer>,
    pub model: Arc<FrequencyModel>,

    best_layout: Layout,
    best_score: f64,
    initial_layout: Layout,
    initial_score: f64,

    // Grows for the whole run; no eviction.
    visited: HashSet<Layout>,
    stats: SearchStats,

    pub rng: Rng,
}

impl Climber {
    /// Scores `start` once and takes it as the best known layout.
    pub fn new(
        scorer: Arc<Scorer>,
        model: Arc<FrequencyModel>,
        start: Layout,
        seed: Option<u64>,
    ) -> Self {
        let score = scorer.score(&start, &model);
        Self::with_score(scorer, model, start, score, seed)
    }

    /// Starts from a layout whose score is already known.
    pub fn with_score(
        scorer: Arc<Scorer>,
        model: Arc<FrequencyModel>,
        start: Layout,
        score: f64,
        seed: Option<u64>,
    ) -> Self {
        let mut visited = HashSet::new();
        visited.insert(start);

        Climber {
            scorer,
            model,
            best_layout: start,
            best_score: score,
            initial_layout: start,
            initial_score: score,
            visited,
            stats: SearchStats::default(),
            rng: mutation::build_rng(seed),
        }
    }

    pub fn best_layout(&self) -> &Layout {
        &self.best_layout
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn initial_layout(&self) -> &Layout {
        &self.initial_layout
    }

    pub fn initial_score(&self) -> f64 {
        self.initial_score
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn has_visited(&self, layout: &Layout) -> bool {
        self.visited.contains(layout)
    }

    /// Runs one iteration: draw, swap, dedupe, score, keep if strictly better.
    pub fn step(&mut self) -> SearchEvent {
        let event = match mutation::draw_swap(&mut self.rng) {
            None => SearchEvent::DegenerateDraw,
            Some((idx_a, idx_b)) => self.try_swap(idx_a, idx_b),
        };
        self.stats.record(&event);
        event
    }

    fn try_swap(&mut self, idx_a: usize, idx_b: usize) -> SearchEvent {
        let candidate = self.best_layout.swap(idx_a, idx_b);
        if !self.visited.insert(candidate) {
            return SearchEvent::Duplicate;
        }

        let geom = self.scorer.geometry(&candidate);
        let score = self.scorer.score_geometry(&geom, &self.model);

        if score < self.best_score {
            self.best_layout = candidate;
            self.best_score = score;
            SearchEvent::Improvement {
                score,
                delta_pct: percent_delta(score, self.initial_score),
                layout: candidate,
            }
        } else {
            SearchEvent::NoImprovement { score }
        }
    }
}

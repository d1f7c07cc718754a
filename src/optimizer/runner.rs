use super::{Climber, SearchEvent, SearchStats};
use crate::config::Config;
use crate::error::{KeyForgeError, KfResult};
use crate::geometry::Layout;
use crate::model::FrequencyModel;
use crate::scorer::{rank_layouts, Scorer};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub seed: Option<u64>,
    pub max_iterations: Option<u64>,
    pub max_time: Option<Duration>,
}

impl From<&Config> for SearchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            seed: cfg.search.seed,
            max_iterations: cfg.search.max_iterations,
            max_time: cfg.search.max_time(),
        }
    }
}

/// Cooperative stop signal, checked between iterations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// The underlying flag, for handing to signal handlers.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Cancelled,
    IterationLimit,
    TimeLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub best_layout: Layout,
    pub best_score: f64,
    pub initial_layout: Layout,
    pub initial_score: f64,
    /// `initial_score - best_score`; never negative.
    pub improvement: f64,
    pub improvement_pct: f64,
    pub stats: SearchStats,
    pub visited: usize,
    pub elapsed_secs: f64,
    pub stop_reason: StopReason,
}

/// Receives live search events and the final report.
pub trait SearchObserver {
    fn on_event(&mut self, iteration: u64, event: &SearchEvent);

    fn on_finish(&mut self, _report: &SearchReport) {}
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    model: Arc<FrequencyModel>,
    options: SearchOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, model: Arc<FrequencyModel>, options: SearchOptions) -> Self {
        Self {
            scorer,
            model,
            options,
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Seeds a climber with the lowest-scoring catalog entry.
    pub fn climber_from_catalog(&self, entries: &[(String, Layout)]) -> KfResult<Climber> {
        let ranked = rank_layouts(&self.scorer, &self.model, entries);
        let best = ranked.first().ok_or_else(|| {
            KeyForgeError::Config("cannot seed the search from an empty catalog".to_string())
        })?;
        let layout = Layout::parse(&best.layout)?;

        info!("🌱 Seeding search with {} ({:.2})", best.name, best.score);
        Ok(Climber::with_score(
            self.scorer.clone(),
            self.model.clone(),
            layout,
            best.score,
            self.options.seed,
        ))
    }

    pub fn climber_from_layout(&self, start: Layout) -> Climber {
        let climber = Climber::new(
            self.scorer.clone(),
            self.model.clone(),
            start,
            self.options.seed,
        );
        info!(
            "🌱 Seeding search with {} ({:.2})",
            start,
            climber.initial_score()
        );
        climber
    }

    /// Climbs until cancelled (or an optional limit is hit), then reports once.
    pub fn run<O: SearchObserver>(
        &self,
        climber: &mut Climber,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> SearchReport {
        let opts = &self.options;
        let start_time = Instant::now();
        let start_iterations = climber.stats().iterations;

        let stop_reason = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if let Some(limit) = opts.max_iterations {
                if climber.stats().iterations - start_iterations >= limit {
                    break StopReason::IterationLimit;
                }
            }
            if let Some(limit) = opts.max_time {
                if start_time.elapsed() >= limit {
                    break StopReason::TimeLimit;
                }
            }

            let event = climber.step();
            let iteration = climber.stats().iterations;
            if let SearchEvent::Improvement { score, delta_pct, .. } = &event {
                debug!(
                    "Iter {:8} | Improved: {:.2} ({:+.2}%)",
                    iteration, score, delta_pct
                );
            }
            observer.on_event(iteration, &event);
        };

        let report = build_report(climber, stop_reason, start_time.elapsed());
        info!(
            "🏁 Search stopped ({:?}) after {} iterations",
            report.stop_reason, report.stats.iterations
        );
        observer.on_finish(&report);
        report
    }
}

pub fn build_report(climber: &Climber, stop_reason: StopReason, elapsed: Duration) -> SearchReport {
    let improvement = climber.initial_score() - climber.best_score();
    let improvement_pct = if climber.initial_score() > 0.0 {
        improvement / climber.initial_score() * 100.0
    } else {
        0.0
    };
    SearchReport {
        best_layout: *climber.best_layout(),
        best_score: climber.best_score(),
        initial_layout: *climber.initial_layout(),
        initial_score: climber.initial_score(),
        improvement,
        improvement_pct,
        stats: climber.stats(),
        visited: climber.visited_count(),
        elapsed_secs: elapsed.as_secs_f64(),
        stop_reason,
    }
}

use crate::reports;
use clap::Args;
use keyclimb::config::Config;
use keyclimb::error::KfResult;
use keyclimb::geometry::Layout;
use keyclimb::layouts::get_all_layouts;
use keyclimb::model::FrequencyModel;
use keyclimb::optimizer::{
    CancelToken, Optimizer, SearchEvent, SearchObserver, SearchOptions, SearchReport,
};
use keyclimb::scorer::Scorer;
use signal_hook::consts::TERM_SIGNALS;
use signal_hook::flag;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    /// Start from this 30-character layout instead of the best catalog entry
    #[arg(long)]
    pub start: Option<String>,
}

/// Streams search progress to the log and prints the final summary.
struct CliLogger {
    report_interval: u64,
    best_score: f64,
}

impl SearchObserver for CliLogger {
    fn on_event(&mut self, iteration: u64, event: &SearchEvent) {
        match event {
            SearchEvent::Improvement {
                score,
                delta_pct,
                layout,
            } => {
                self.best_score = *score;
                info!(
                    "✨ Iter {:8} | {:.2} ({:+.3}%) | {}",
                    iteration, score, delta_pct, layout
                );
            }
            other => debug!("Iter {:8} | {:?}", iteration, other),
        }

        if self.report_interval > 0 && iteration % self.report_interval == 0 {
            info!("   Iter {:8} | Best: {:.2}", iteration, self.best_score);
        }
    }

    fn on_finish(&mut self, report: &SearchReport) {
        reports::print_search_report(report);
    }
}

pub fn run(args: &SearchArgs, scorer: Arc<Scorer>, model: Arc<FrequencyModel>) -> KfResult<()> {
    let cancel = CancelToken::new();
    // Every signal only requests a stop, so the final report always prints.
    for &sig in TERM_SIGNALS {
        flag::register(sig, cancel.flag())?;
    }

    let optimizer = Optimizer::new(scorer, model, SearchOptions::from(&args.config));
    let mut climber = match &args.start {
        Some(start) => optimizer.climber_from_layout(Layout::parse(start)?),
        None => optimizer.climber_from_catalog(&get_all_layouts()?)?,
    };

    println!("\n🧗 Climbing (Ctrl-C to stop)");
    reports::print_layout_grid("Start", climber.initial_layout());

    let mut logger = CliLogger {
        report_interval: args.config.search.report_interval,
        best_score: climber.best_score(),
    };
    optimizer.run(&mut climber, &cancel, &mut logger);
    Ok(())
}

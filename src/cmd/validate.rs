use crate::reports;
use clap::Args;
use keyclimb::config::Config;
use keyclimb::error::{KeyForgeError, KfResult};
use keyclimb::geometry::Layout;
use keyclimb::layouts::get_all_layouts;
use keyclimb::model::FrequencyModel;
use keyclimb::scorer::{rank_layouts, write_rankings_csv, Scorer};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Only keep catalog layouts whose name contains this text
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Extra 30-character layout to rank alongside the catalog
    #[arg(long)]
    pub custom: Option<String>,

    /// Write the ranking to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn run(args: &ValidateArgs, scorer: Arc<Scorer>, model: Arc<FrequencyModel>) -> KfResult<()> {
    reports::print_key_usage(&model.key_usage(), model.total());

    let mut entries: Vec<(String, Layout)> = get_all_layouts()?
        .into_iter()
        .filter(|(name, _)| match &args.layout {
            Some(filter) => name.to_lowercase().contains(&filter.to_lowercase()),
            None => true,
        })
        .collect();

    if let Some(custom) = &args.custom {
        entries.push(("Custom".to_string(), Layout::parse(custom)?));
    }

    if entries.is_empty() {
        return Err(KeyForgeError::Config(format!(
            "no layouts match '{}'",
            args.layout.as_deref().unwrap_or_default()
        )));
    }

    println!("\n🔎 === LAYOUT AUDIT === 🔎");
    for (name, layout) in &entries {
        reports::print_layout_grid(name, layout);
    }

    let rankings = rank_layouts(&scorer, &model, &entries);
    let details: Vec<_> = rankings
        .iter()
        .filter_map(|r| {
            let layout = entries.iter().find(|(name, _)| *name == r.name)?.1;
            Some((r.name.clone(), scorer.score_details(&layout, &model)))
        })
        .collect();

    reports::print_breakdown_report(&details);
    reports::print_ranking_report(&rankings);

    if let Some(path) = &args.export {
        write_rankings_csv(&rankings, File::create(path)?)?;
        info!("📄 Ranking exported to {}", path.display());
    }
    Ok(())
}

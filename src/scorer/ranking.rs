use super::types::LayoutRanking;
use super::Scorer;
use crate::error::KfResult;
use crate::geometry::Layout;
use crate::model::FrequencyModel;
use rayon::prelude::*;
use std::io::Write;

/// Scores every named layout and sorts them best (lowest) first.
pub fn rank_layouts(
    scorer: &Scorer,
    model: &FrequencyModel,
    entries: &[(String, Layout)],
) -> Vec<LayoutRanking> {
    let mut ranked: Vec<LayoutRanking> = entries
        .par_iter()
        .map(|(name, layout)| LayoutRanking {
            name: name.clone(),
            layout: layout.to_string(),
            score: scorer.score(layout, model),
            delta_pct: 0.0,
        })
        .collect();

    ranked.sort_by(|a, b| a.score.total_cmp(&b.score).then_with(|| a.name.cmp(&b.name)));

    if let Some(best) = ranked.first().map(|r| r.score) {
        for r in &mut ranked {
            r.delta_pct = percent_delta(r.score, best);
        }
    }
    ranked
}

/// `(score - reference) / reference` as a percentage; 0 when the reference is 0.
pub fn percent_delta(score: f64, reference: f64) -> f64 {
    if reference > 0.0 {
        (score - reference) / reference * 100.0
    } else {
        0.0
    }
}

/// Writes a ranking as CSV with a header row.
pub fn write_rankings_csv<W: Write>(rankings: &[LayoutRanking], writer: W) -> KfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in rankings {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

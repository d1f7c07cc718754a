use crate::error::{KeyForgeError, KfResult};
use crate::geometry::EffortGrid;
use crate::scorer::Penalties;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Colemak Mod-DH effort grid, row by row (top, home, bottom).
pub const DEFAULT_EFFORT_GRID: &str = "3.0,2.4,2.0,2.2,3.2,3.2,2.2,2.0,2.4,3.0,\
1.6,1.3,1.1,1.0,2.9,2.9,1.0,1.1,1.3,1.6,\
3.2,2.6,2.3,1.6,3.0,3.0,1.6,2.3,2.6,3.2";

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Seed for the swap generator (random when omitted)
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Stop after this many iterations instead of waiting for Ctrl-C
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(short = 'T', long)]
    pub time_limit: Option<u64>,

    /// Log a progress line every N iterations
    #[arg(long, default_value_t = 10_000)]
    pub report_interval: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            seed: None,
            max_iterations: None,
            time_limit: None,
            report_interval: 10_000,
        }
    }
}

impl SearchParams {
    pub fn max_time(&self) -> Option<Duration> {
        self.time_limit.map(Duration::from_secs)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // Added when consecutive keys are typed by the same hand
    #[arg(long, default_value_t = 0.0)]
    pub penalty_same_hand: f64,

    // Unit cost of a letter the layout does not carry
    #[arg(long, default_value_t = 5.0)]
    pub penalty_missing: f64,

    // Added when two different keys share a column (same finger)
    #[arg(long, default_value_t = 1.0)]
    pub penalty_same_finger: f64,

    #[arg(long, default_value = DEFAULT_EFFORT_GRID)]
    pub effort_grid: String,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            penalty_same_hand: 0.0,
            penalty_missing: 5.0,
            penalty_same_finger: 1.0,
            effort_grid: DEFAULT_EFFORT_GRID.to_string(),
        }
    }
}

impl ScoringWeights {
    pub fn penalties(&self) -> Penalties {
        Penalties {
            same_hand: self.penalty_same_hand,
            missing: self.penalty_missing,
            same_finger: self.penalty_same_finger,
        }
    }

    pub fn get_effort_grid(&self) -> KfResult<EffortGrid> {
        EffortGrid::parse(&self.effort_grid)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KeyForgeError::Config(format!(
                "Failed to read weights file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let weights: Self = serde_json::from_str(&content)?;
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> KfResult<()> {
        let named = [
            ("penalty_same_hand", self.penalty_same_hand),
            ("penalty_missing", self.penalty_missing),
            ("penalty_same_finger", self.penalty_same_finger),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(KeyForgeError::Config(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        self.get_effort_grid().map(|_| ())
    }

    /// Overwrites fields with values the user passed explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli_weights: &ScoringWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field.clone();
                }
            };
        }

        update_if_present!(penalty_same_hand, "penalty_same_hand");
        update_if_present!(penalty_missing, "penalty_missing");
        update_if_present!(penalty_same_finger, "penalty_same_finger");
        update_if_present!(effort_grid, "effort_grid");
    }
}

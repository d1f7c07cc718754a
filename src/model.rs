use crate::error::{KeyForgeError, KfResult};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// An ordered pair of adjacent characters. `prev` is `None` at the start of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Transition {
    pub prev: Option<char>,
    pub key: char,
}

impl Transition {
    pub fn new(prev: Option<char>, key: char) -> Self {
        Transition { prev, key }
    }

    pub fn start(key: char) -> Self {
        Transition { prev: None, key }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransitionRecord {
    prev: Option<char>,
    key: char,
    count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    transitions: Vec<TransitionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyUsage {
    pub key: char,
    pub count: u64,
}

/// Bigram counts, iterated in a canonical order so that every aggregation
/// over the model is independent of how it was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyModel {
    transitions: BTreeMap<Transition, u64>,
}

impl FrequencyModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `prev -> key`.
    pub fn add(&mut self, prev: Option<char>, key: char, count: u64) {
        let slot = self.transitions.entry(Transition::new(prev, key)).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    pub fn get(&self, prev: Option<char>, key: char) -> u64 {
        self.transitions
            .get(&Transition::new(prev, key))
            .copied()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Transition, u64)> {
        self.transitions.iter().map(|(t, &c)| (t, c))
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.transitions
            .values()
            .fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Occurrences of every key (as the second half of a transition), most used first.
    pub fn key_usage(&self) -> Vec<KeyUsage> {
        let mut totals: HashMap<char, u64> = HashMap::new();
        for (t, count) in self.iter() {
            let total = totals.entry(t.key).or_default();
            *total = total.saturating_add(count);
        }

        let mut usage: Vec<KeyUsage> = totals
            .into_iter()
            .map(|(key, count)| KeyUsage { key, count })
            .collect();
        usage.sort_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
        usage
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KfResult<Self> {
        let path = path.as_ref();
        info!("📚 Loading frequency model: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            KeyForgeError::Model(format!("Could not open '{}': {}", path.display(), e))
        })?;
        let model = Self::from_json(&content).map_err(|e| match e {
            KeyForgeError::Json(inner) => {
                KeyForgeError::Model(format!("Malformed '{}': {}", path.display(), inner))
            }
            other => other,
        })?;

        debug!(
            "   -> {} distinct transitions, {} total",
            model.len(),
            model.total()
        );
        Ok(model)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> KfResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        info!(
            "💾 Saved {} transitions to {}",
            self.len(),
            path.display()
        );
        Ok(())
    }

    pub fn from_json(content: &str) -> KfResult<Self> {
        let file: ModelFile = serde_json::from_str(content)?;
        if file.transitions.is_empty() {
            return Err(KeyForgeError::Model(
                "model contains no transitions".to_string(),
            ));
        }

        let mut transitions = BTreeMap::new();
        for rec in file.transitions {
            match transitions.entry(Transition::new(rec.prev, rec.key)) {
                Entry::Vacant(slot) => {
                    slot.insert(rec.count);
                }
                Entry::Occupied(_) => {
                    return Err(KeyForgeError::Model(format!(
                        "duplicate transition {:?} -> {:?}",
                        rec.prev, rec.key
                    )));
                }
            }
        }
        Ok(FrequencyModel { transitions })
    }

    pub fn to_json(&self) -> KfResult<String> {
        let file = ModelFile {
            transitions: self
                .iter()
                .map(|(t, count)| TransitionRecord {
                    prev: t.prev,
                    key: t.key,
                    count,
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}

impl FromIterator<(Option<char>, char, u64)> for FrequencyModel {
    fn from_iter<I: IntoIterator<Item = (Option<char>, char, u64)>>(iter: I) -> Self {
        let mut model = FrequencyModel::new();
        for (prev, key, count) in iter {
            model.add(prev, key, count);
        }
        model
    }
}

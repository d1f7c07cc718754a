use crate::error::{KeyForgeError, KfResult};
use crate::model::FrequencyModel;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Counts adjacent character pairs in one document.
///
/// Non-ASCII characters are dropped before windowing and everything else is
/// lowercased, so the pair spanning a dropped character joins its neighbours.
/// The first kept character has no predecessor.
pub fn add_document(model: &mut FrequencyModel, text: &str) {
    let mut prev: Option<char> = None;
    for c in text.chars().filter(char::is_ascii) {
        let key = c.to_ascii_lowercase();
        model.add(prev, key, 1);
        prev = Some(key);
    }
}

pub fn model_from_text(text: &str) -> FrequencyModel {
    let mut model = FrequencyModel::new();
    add_document(&mut model, text);
    model
}

/// Builds a model from a set of UTF-8 text files, each treated as its own document.
pub fn ingest_files<P: AsRef<Path>>(paths: &[P]) -> KfResult<FrequencyModel> {
    if paths.is_empty() {
        return Err(KeyForgeError::Config(
            "no corpus files were given".to_string(),
        ));
    }

    let mut model = FrequencyModel::new();
    for path in paths {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            KeyForgeError::Model(format!("Could not read corpus '{}': {}", path.display(), e))
        })?;
        let before = model.total();
        add_document(&mut model, &text);
        debug!(
            "   {} -> {} transitions",
            path.display(),
            model.total() - before
        );
    }

    if model.is_empty() {
        return Err(KeyForgeError::Model(
            "corpus produced no transitions".to_string(),
        ));
    }

    info!(
        "📖 Ingested {} file(s): {} distinct transitions",
        paths.len(),
        model.len()
    );
    Ok(model)
}

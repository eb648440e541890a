use std::path::Path;

use klara_core::models::assessment::AssessmentResult;
use klara_core::models::history::SymptomHistory;

use crate::config::write_atomic;

/// Read the stored history. A missing file is an empty history; a corrupt
/// one is discarded by [`SymptomHistory::hydrate`].
pub fn load_history(path: &Path) -> eyre::Result<SymptomHistory> {
    if !path.exists() {
        return Ok(SymptomHistory::new());
    }
    let stored = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read history at {}: {e}", path.display()))?;
    Ok(SymptomHistory::hydrate(&stored))
}

pub fn save_history(path: &Path, history: &SymptomHistory) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = history.to_json()?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), entries = history.len(), "history saved");
    Ok(())
}

/// Load, append one result, and write back.
pub fn append_result(path: &Path, result: AssessmentResult) -> eyre::Result<SymptomHistory> {
    let mut history = load_history(path)?;
    history.append(result);
    save_history(path, &history)?;
    Ok(history)
}

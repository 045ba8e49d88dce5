//! Saving and restoring a session's state as JSON.

use crate::calculator::CalculatorState;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load a saved state. A missing file is not an error.
pub fn load_state(path: &Path) -> Result<Option<CalculatorState>> {
    if !path.exists() {
        debug!("No session file at {}, starting fresh", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file {}", path.display()))?;
    let state = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse session file {}", path.display()))?;

    info!("Restored session from: {}", path.display());
    Ok(Some(state))
}

/// Save a state, creating the parent directory if needed.
pub fn save_state(path: &Path, state: &CalculatorState) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write session file {}", path.display()))?;

    debug!("Saved session to: {}", path.display());
    Ok(())
}

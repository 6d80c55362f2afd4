use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::MonitorError;

/// Load the id -> modified mapping from the state file.
///
/// An absent file is an empty mapping. The file must hold a JSON object;
/// values are coerced to strings so a hand-edited numeric value still
/// round-trips.
pub fn load_state(path: &Path) -> Result<BTreeMap<String, String>, MonitorError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path)?;
    let raw: Value = serde_json::from_str(&content)
        .map_err(|e| MonitorError::Format(format!("State file is not valid JSON: {}", e)))?;

    let object = raw
        .as_object()
        .ok_or_else(|| MonitorError::Format("State file must contain an object".to_string()))?;

    let mut state = BTreeMap::new();
    for (key, value) in object {
        let value = match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        };
        state.insert(key.clone(), value);
    }
    Ok(state)
}

/// Overwrite the state file with the given mapping, pretty-printed with
/// sorted keys (BTreeMap iteration order).
pub fn save_state(path: &Path, state: &BTreeMap<String, String>) -> Result<(), MonitorError> {
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| MonitorError::Format(format!("Failed to serialize state: {}", e)))?;
    fs::write(path, json)?;
    Ok(())
}

use std::path::Path;

use tracing::debug;

use crate::diagnostics::CheckError;

use super::SourceUnit;

/// Read a declaration tree from a `.json` or `.toml` file.
pub fn load_tree(path: &Path) -> Result<SourceUnit, CheckError> {
    let text = std::fs::read_to_string(path).map_err(|e| CheckError::io(path, e))?;
    let unit = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(&text, path)?,
        Some("toml") => parse_toml(&text, path)?,
        _ => return Err(CheckError::UnsupportedFormat { path: path.to_path_buf() }),
    };
    debug!(path = %path.display(), items = unit.items.len(), "loaded declaration tree");
    Ok(unit)
}

pub fn parse_json(text: &str, path: &Path) -> Result<SourceUnit, CheckError> {
    serde_json::from_str(text).map_err(|e| CheckError::tree(e.to_string(), path))
}

pub fn parse_toml(text: &str, path: &Path) -> Result<SourceUnit, CheckError> {
    toml::from_str(text).map_err(|e| CheckError::tree(e.message().to_string(), path))
}

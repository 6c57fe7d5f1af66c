//! `accessck.toml`: per-rule severity policy.
//!
//! ```toml
//! [check]
//! warnings-as-errors = false
//!
//! [rules]
//! non-objc-open-in-extension = "allow"
//! ```
//!
//! The checker always produces its diagnostics; the policy is applied
//! afterwards, so rule precedence is never affected by configuration.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::diagnostics::{CheckError, Diagnostic, RuleId, Severity};

pub const CONFIG_FILE: &str = "accessck.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Allow,
    Warn,
    Error,
}

impl From<Severity> for RuleLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => RuleLevel::Warn,
            Severity::Error => RuleLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub warnings_as_errors: bool,
    pub levels: HashMap<RuleId, RuleLevel>,
    /// File the config was read from. None for the built-in defaults.
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn level(&self, rule: RuleId) -> RuleLevel {
        self.levels
            .get(&rule)
            .copied()
            .unwrap_or_else(|| rule.default_severity().into())
    }

    /// Drop allowed diagnostics and set the severity of the rest.
    pub fn apply(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter_map(|mut diag| {
                diag.severity = match self.level(diag.rule()) {
                    RuleLevel::Allow => return None,
                    RuleLevel::Warn if self.warnings_as_errors => Severity::Error,
                    RuleLevel::Warn => Severity::Warning,
                    RuleLevel::Error => Severity::Error,
                };
                Some(diag)
            })
            .collect()
    }
}

// ---- TOML deserialization types ----

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    check: TomlCheck,
    #[serde(default)]
    rules: BTreeMap<String, RuleLevel>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TomlCheck {
    #[serde(default)]
    warnings_as_errors: bool,
}

pub fn parse_config(text: &str, path: &Path) -> Result<Config, CheckError> {
    let raw: TomlConfig =
        toml::from_str(text).map_err(|e| CheckError::config(e.message().to_string(), path))?;

    let mut levels = HashMap::new();
    for (name, level) in raw.rules {
        let rule = RuleId::from_code(&name)
            .ok_or_else(|| CheckError::config(format!("unknown rule '{name}'"), path))?;
        levels.insert(rule, level);
    }

    Ok(Config {
        warnings_as_errors: raw.check.warnings_as_errors,
        levels,
        path: Some(path.to_path_buf()),
    })
}

pub fn load_config(path: &Path) -> Result<Config, CheckError> {
    let text = std::fs::read_to_string(path).map_err(|e| CheckError::io(path, e))?;
    let config = parse_config(&text, path)?;
    debug!(path = %path.display(), rules = config.levels.len(), "loaded config");
    Ok(config)
}

/// Walk up from `start` looking for `accessck.toml`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        let candidate = d.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = d.parent();
    }
    None
}

/// Config for a tree file: the nearest `accessck.toml` above it, or defaults.
pub fn discover(tree_path: &Path) -> Result<Config, CheckError> {
    let start = tree_path.parent().unwrap_or(Path::new("."));
    match find_config(start) {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

//! Configuration management for codewisdom
//!
//! Values come from `~/.codewisdomconfig`, then `./.codewisdomconfig`, each
//! overriding the last, or from a single file given with `--config`.

use crate::defaults;
use crate::score::ScoringConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".codewisdomconfig";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("Malformed config file {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Index above which a file is shown as a warning
    pub warn_index: f64,
    /// Index above which a file is shown as critical
    pub critical_index: f64,
    pub show_functions: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            warn_index: defaults::report::WARN_INDEX,
            critical_index: defaults::report::CRITICAL_INDEX,
            show_functions: defaults::report::SHOW_FUNCTIONS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub report: ReportConfig,
    /// Path prefixes, relative to the analyzed root, to leave out
    pub ignore: Vec<String>,
}

impl Config {
    /// Load config from the home directory and the working directory, later
    /// files overriding earlier ones. Missing files are skipped.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut candidates = Vec::new();
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(Path::new(&home).join(CONFIG_FILE_NAME));
        }
        candidates.push(PathBuf::from(CONFIG_FILE_NAME));
        for path in candidates {
            if let Ok(content) = std::fs::read_to_string(&path) {
                tracing::debug!("Loading config from {}", path.display());
                config.merge_from_toml(&content, &path)?;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content, path)
    }

    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge_from_toml(content, origin)?;
        config.validate()?;
        Ok(config)
    }

    fn merge_from_toml(&mut self, content: &str, origin: &Path) -> Result<(), ConfigError> {
        let table = content
            .parse::<toml::Table>()
            .map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })?;
        check_unknown_keys(&table, &["scoring", "report", "analysis"], "top level");

        if let Some(scoring) = table.get("scoring").and_then(|v| v.as_table()) {
            self.apply_scoring(scoring);
        }
        if let Some(report) = table.get("report").and_then(|v| v.as_table()) {
            self.apply_report(report);
        }
        if let Some(analysis) = table.get("analysis").and_then(|v| v.as_table()) {
            check_unknown_keys(analysis, &["ignore"], "analysis");
            if let Some(ignore) = get_string_array(analysis, "ignore") {
                self.ignore = ignore;
            }
        }
        Ok(())
    }

    /// Apply values from [scoring] section
    fn apply_scoring(&mut self, table: &toml::Table) {
        let s = &mut self.scoring;
        let fields: [(&str, &mut f64); 12] = [
            ("complexity_weight", &mut s.complexity_weight),
            ("length_weight", &mut s.length_weight),
            ("comment_weight", &mut s.comment_weight),
            ("naming_weight", &mut s.naming_weight),
            ("header_comment_weight", &mut s.header_comment_weight),
            ("header_naming_weight", &mut s.header_naming_weight),
            ("max_complexity", &mut s.max_complexity),
            ("ideal_function_length", &mut s.ideal_function_length),
            ("max_function_length", &mut s.max_function_length),
            ("ideal_comment_ratio", &mut s.ideal_comment_ratio),
            ("header_comment_target", &mut s.header_comment_target),
            ("naming_penalty", &mut s.naming_penalty),
        ];
        let known: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
        check_unknown_keys(table, &known, "scoring");
        for (key, slot) in fields {
            if let Some(v) = get_f64(table, key) {
                *slot = v;
            }
        }
    }

    /// Apply values from [report] section
    fn apply_report(&mut self, table: &toml::Table) {
        check_unknown_keys(table, &["warn_index", "critical_index", "show_functions"], "report");
        if let Some(v) = get_f64(table, "warn_index") {
            self.report.warn_index = v;
        }
        if let Some(v) = get_f64(table, "critical_index") {
            self.report.critical_index = v;
        }
        if let Some(v) = table.get("show_functions").and_then(toml::Value::as_bool) {
            self.report.show_functions = v;
        } else if table.contains_key("show_functions") {
            tracing::warn!("Config key 'show_functions' expected bool");
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate().map_err(ConfigError::Invalid)?;
        let r = &self.report;
        if !(0.0..=100.0).contains(&r.warn_index) || !(0.0..=100.0).contains(&r.critical_index) {
            return Err(ConfigError::Invalid("report thresholds must be 0-100".to_string()));
        }
        if r.warn_index > r.critical_index {
            return Err(ConfigError::Invalid(format!(
                "warn_index ({}) must not exceed critical_index ({})",
                r.warn_index, r.critical_index
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_unknown_keys(table: &toml::Table, known: &[&str], section: &str) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            tracing::warn!("Unknown config key '{key}' in [{section}]");
        }
    }
}

/// Integers are accepted where a float is expected.
fn get_f64(table: &toml::Table, key: &str) -> Option<f64> {
    let value = table.get(key)?;
    value.as_float().or_else(|| value.as_integer().map(|i| i as f64)).or_else(|| {
        tracing::warn!("Config key '{key}' expected number, got {}", value.type_str());
        None
    })
}

fn get_string_array(table: &toml::Table, key: &str) -> Option<Vec<String>> {
    let value = table.get(key)?;
    let Some(items) = value.as_array() else {
        tracing::warn!("Config key '{key}' expected array, got {}", value.type_str());
        return None;
    };
    Some(items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
}

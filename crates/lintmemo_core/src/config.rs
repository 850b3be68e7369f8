//! Analyzer configuration.

use std::fs;
use std::path::{Component, Path, PathBuf};

use jsonc_parser::ParseOptions;
use lintmemo_cache::{DirStore, Globals, Options, ResultCache};
use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;
use crate::request::AnalysisRequest;

/// Configuration shared by every file of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Rule options handed to the engine.
    #[serde(default)]
    pub options: Options,

    /// Globals the engine should accept.
    #[serde(default)]
    pub globals: Globals,

    /// Result cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Base directory for resolving relative paths.
    /// This is usually the directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Result cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Whether to skip files already known to pass.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Cache directory.
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,

    /// Cache version. Each version gets its own store, so bumping it starts
    /// from an empty cache.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_enabled() -> bool {
    true
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".lintmemo-cache")
}

fn default_version() -> String {
    "1".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            dir: default_cache_dir(),
            version: default_version(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a configuration with empty options and globals and caching enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file. Comments are allowed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AnalyzerError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSON, with comments and trailing commas allowed.
    pub fn from_json(json: &str) -> Result<Self, AnalyzerError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| AnalyzerError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        let config: Self = serde_json::from_value(value)
            .map_err(|e| AnalyzerError::config(format!("Invalid config: {}", e)))?;

        if !is_single_component(&config.cache.version) {
            return Err(AnalyzerError::config(format!(
                "Invalid cache version {:?}: must be a plain directory name",
                config.cache.version
            )));
        }

        Ok(config)
    }

    /// Directory of the store for the configured cache version.
    pub fn cache_dir(&self) -> PathBuf {
        let dir = match &self.base_dir {
            Some(base) if self.cache.dir.is_relative() => base.join(&self.cache.dir),
            _ => self.cache.dir.clone(),
        };
        dir.join(&self.cache.version)
    }

    /// Opens the on-disk result cache for the configured cache version.
    pub fn open_cache(&self) -> ResultCache<DirStore> {
        ResultCache::open(self.cache_dir())
    }

    /// Builds the request for analyzing `path` with this configuration.
    pub fn request(&self, path: impl Into<PathBuf>) -> AnalysisRequest {
        AnalysisRequest::new(path)
            .with_options(self.options.clone())
            .with_globals(self.globals.clone())
            .with_caching(self.cache.enabled)
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) => c == name,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_config_defaults() {
        let config = AnalyzerConfig::new();

        assert!(config.options.is_empty());
        assert!(config.globals.is_empty());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.dir, PathBuf::from(".lintmemo-cache"));
        assert_eq!(config.cache.version, "1");
    }

    #[test]
    fn test_config_from_json_with_comments() {
        let json = r#"{
            // rule options
            "options": { "unused": true, "maxlen": 120 },
            "globals": { "jQuery": false },
            "cache": { "enabled": false, "version": "2" },
        }"#;

        let config = AnalyzerConfig::from_json(json).unwrap();

        assert_eq!(config.options.get("unused"), Some(&json!(true)));
        assert_eq!(config.options.get("maxlen"), Some(&json!(120)));
        assert_eq!(config.globals.get("jQuery"), Some(&false));
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.version, "2");
        assert_eq!(config.cache.dir, PathBuf::from(".lintmemo-cache"));
    }

    #[test]
    fn test_config_from_empty_document() {
        assert_eq!(AnalyzerConfig::from_json("").unwrap(), AnalyzerConfig::new());
        assert_eq!(AnalyzerConfig::from_json("{}").unwrap(), AnalyzerConfig::new());
    }

    #[rstest]
    #[case::invalid_json("{ \"options\": ")]
    #[case::unknown_field(r#"{ "rules": {} }"#)]
    #[case::wrong_type(r#"{ "globals": { "jQuery": "yes" } }"#)]
    #[case::version_with_separator(r#"{ "cache": { "version": "a/b" } }"#)]
    #[case::version_parent(r#"{ "cache": { "version": ".." } }"#)]
    #[case::version_empty(r#"{ "cache": { "version": "" } }"#)]
    fn test_config_rejects(#[case] json: &str) {
        assert!(matches!(
            AnalyzerConfig::from_json(json),
            Err(AnalyzerError::Config(_))
        ));
    }

    #[test]
    fn test_config_from_file_sets_base_dir() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".lintmemo.json");
        std::fs::write(&path, r#"{ "cache": { "dir": "cache", "version": "v3" } }"#).unwrap();

        let config = AnalyzerConfig::from_file(&path).unwrap();

        assert_eq!(config.base_dir.as_deref(), Some(temp_dir.path()));
        assert_eq!(config.cache_dir(), temp_dir.path().join("cache").join("v3"));
    }

    #[test]
    fn test_config_from_missing_file() {
        let result = AnalyzerConfig::from_file("/nonexistent/.lintmemo.json");

        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn test_cache_dir_absolute_ignores_base_dir() {
        let temp_dir = tempdir().unwrap();
        let mut config = AnalyzerConfig::new();
        config.cache.dir = temp_dir.path().join("abs");
        config.base_dir = Some(PathBuf::from("/somewhere/else"));

        assert_eq!(config.cache_dir(), temp_dir.path().join("abs").join("1"));
    }

    #[test]
    fn test_request_uses_config() {
        let config = AnalyzerConfig::from_json(
            r#"{ "options": { "unused": true }, "globals": { "$": true }, "cache": { "enabled": false } }"#,
        )
        .unwrap();

        let request = config.request("src/app.js");

        assert_eq!(request.path(), Path::new("src/app.js"));
        assert_eq!(request.options(), &config.options);
        assert_eq!(request.globals(), &config.globals);
        assert!(!request.caching_enabled());
    }
}

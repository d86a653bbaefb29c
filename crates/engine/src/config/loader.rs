use std::path::{Path, PathBuf};

use factcheck_common::config::SystemConfig;

use super::validation;
use crate::analysis::PatternTables;

/// Complete engine configuration loaded from the config directory.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Parsed system.toml.
    pub system: SystemConfig,
    /// Parsed patterns.toml, or the built-in tables when the file is absent.
    pub patterns: PatternTables,
}

/// Load all configuration from the given config directory.
///
/// Fails loudly with clear error messages if anything is misconfigured.
/// The server refuses to start on validation failure.
pub fn load_config(config_dir: &Path) -> Result<EngineConfig, ConfigError> {
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    // 1. Load and parse system.toml
    let system: SystemConfig = load_toml(&config_dir.join("system.toml"))?;

    // 2. Load heuristic pattern tables, if overridden
    let patterns_path = config_dir.join("patterns.toml");
    let patterns = if patterns_path.exists() {
        load_toml(&patterns_path)?
    } else {
        tracing::warn!(
            path = %patterns_path.display(),
            "Pattern file does not exist, using built-in pattern tables"
        );
        PatternTables::default()
    };

    let config = EngineConfig { system, patterns };

    // 3. Validate everything
    validation::validate(&config)?;

    tracing::info!(
        known_true = config.patterns.known_true.len(),
        known_false = config.patterns.known_false.len(),
        negation_markers = config.patterns.negation_markers.len(),
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped_config_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config")
    }

    fn temp_config_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "factcheck-config-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_shipped_config() {
        let config = load_config(&shipped_config_dir()).unwrap();
        assert_eq!(config.system.analysis.max_documents, 3);
        assert!(config.patterns.is_known_false("The earth is flat"));
    }

    #[test]
    fn test_shipped_patterns_match_built_in_tables() {
        let config = load_config(&shipped_config_dir()).unwrap();
        let built_in = PatternTables::default();
        assert_eq!(config.patterns.known_true, built_in.known_true);
        assert_eq!(config.patterns.known_false, built_in.known_false);
        assert_eq!(config.patterns.negation_markers, built_in.negation_markers);
    }

    #[test]
    fn test_missing_directory_is_a_read_error() {
        let result = load_config(Path::new("/nonexistent/factcheck/config"));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn test_missing_patterns_fall_back_to_defaults() {
        let dir = temp_config_dir("no-patterns");
        let system = std::fs::read_to_string(shipped_config_dir().join("system.toml")).unwrap();
        std::fs::write(dir.join("system.toml"), system).unwrap();

        let config = load_config(&dir).unwrap();
        assert_eq!(
            config.patterns.known_true.len(),
            PatternTables::default().known_true.len()
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_system_file_is_a_parse_error() {
        let dir = temp_config_dir("malformed");
        std::fs::write(dir.join("system.toml"), "[extraction\nbroken").unwrap();

        let result = load_config(&dir);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

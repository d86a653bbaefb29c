use super::loader::{ConfigError, EngineConfig};

/// Validate the complete engine configuration.
///
/// Checks sane ranges on numeric parameters and that the pattern tables can
/// actually match a lower-cased statement. The server refuses to start on
/// validation failure.
pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_extraction(config, &mut errors);
    validate_discovery(config, &mut errors);
    validate_analysis(config, &mut errors);
    validate_patterns(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.join("; ")))
    }
}

fn validate_extraction(config: &EngineConfig, errors: &mut Vec<String>) {
    let e = &config.system.extraction;

    if e.fetch_timeout_seconds == 0 {
        errors.push("extraction.fetch_timeout_seconds must be > 0".into());
    }
    if e.max_content_chars == 0 {
        errors.push("extraction.max_content_chars must be > 0".into());
    }
    if e.min_usable_chars > e.min_strategy_chars {
        errors.push(format!(
            "extraction.min_usable_chars ({}) must be <= extraction.min_strategy_chars ({})",
            e.min_usable_chars, e.min_strategy_chars
        ));
    }
    if e.user_agent.trim().is_empty() {
        errors.push("extraction.user_agent must not be empty".into());
    }
}

fn validate_discovery(config: &EngineConfig, errors: &mut Vec<String>) {
    let d = &config.system.discovery;

    if d.max_sources == 0 {
        errors.push("discovery.max_sources must be > 0".into());
    }
    if d.encyclopedia_lookup {
        if d.lookup_timeout_seconds == 0 {
            errors.push("discovery.lookup_timeout_seconds must be > 0".into());
        }
        if !d.summary_api_url.starts_with("http://") && !d.summary_api_url.starts_with("https://")
        {
            errors.push(format!(
                "discovery.summary_api_url must be an http(s) URL, got '{}'",
                d.summary_api_url
            ));
        }
    }
}

fn validate_analysis(config: &EngineConfig, errors: &mut Vec<String>) {
    let a = &config.system.analysis;

    if a.max_documents == 0 {
        errors.push("analysis.max_documents must be > 0".into());
    }
    if a.max_features == 0 {
        errors.push("analysis.max_features must be > 0".into());
    }
    if !(a.max_df > 0.0 && a.max_df <= 1.0) {
        errors.push(format!(
            "analysis.max_df must be in (0.0, 1.0], got {}",
            a.max_df
        ));
    }
}

fn validate_patterns(config: &EngineConfig, errors: &mut Vec<String>) {
    let p = &config.patterns;

    for (i, group) in p.known_true.iter().enumerate() {
        if group.is_empty() {
            errors.push(format!("patterns.known_true[{i}] must not be empty"));
        }
        for word in group {
            check_pattern_entry(&format!("patterns.known_true[{i}]"), word, errors);
        }
    }
    for entry in &p.known_false {
        check_pattern_entry("patterns.known_false", entry, errors);
    }
    for entry in &p.negation_markers {
        check_pattern_entry("patterns.negation_markers", entry, errors);
    }
}

fn check_pattern_entry(field: &str, entry: &str, errors: &mut Vec<String>) {
    if entry.trim().is_empty() {
        errors.push(format!("{field} contains an empty entry"));
    } else if entry.to_lowercase() != entry {
        errors.push(format!("{field} entry '{entry}' must be lower-case"));
    }
}

use crate::config::types::{Config, OutputConfig, SessionConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_session_config(&config.session)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates session configuration
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    // Validate label: non-empty, alphanumeric + hyphens only
    if config.label.is_empty() {
        return Err(ConfigError::Validation("label cannot be empty".to_string()));
    }

    if !config
        .label
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "label must contain only alphanumeric characters and hyphens, got '{}'",
            config.label
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

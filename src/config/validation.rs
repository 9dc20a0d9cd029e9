use super::{Config, ConfigError, Result};

pub fn validate_config(config: &Config) -> Result<()> {
    validate_protected_branches(&config.protected_branches)?;
    if let Some(expiry) = &config.reflog_expiry {
        validate_reflog_expiry(expiry)?;
    }
    Ok(())
}

pub fn validate_protected_branches(branches: &[String]) -> Result<()> {
    if branches.is_empty() {
        return Err(ConfigError::Validation(
            "At least one protected branch is required".to_string(),
        ));
    }

    for name in branches {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Protected branch names cannot be empty".to_string(),
            ));
        }
        if name.chars().any(char::is_whitespace) || name.starts_with('-') {
            return Err(ConfigError::Validation(format!(
                "Invalid protected branch name '{}'",
                name
            )));
        }
    }

    Ok(())
}

pub fn validate_reflog_expiry(expiry: &str) -> Result<()> {
    if expiry.is_empty() || expiry.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "Invalid reflog expiry '{}'. Use a git date such as '90.days' or 'never'",
            expiry
        )));
    }
    Ok(())
}

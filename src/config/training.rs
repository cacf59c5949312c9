//! Training artifact configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where trained-model artifacts are written
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Root of the artifact tree; one subdirectory per bot, created
    /// lazily on the first training for that bot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl TrainingConfig {
    /// Validate training configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingDataDir);
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/models")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_config_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data/models"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_dir() {
        let config = TrainingConfig {
            data_dir: PathBuf::new(),
        };
        assert!(config.validate().is_err());
    }
}

//! Curriculum content configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// YAML catalog replacing the built-in one
    pub catalog_path: Option<PathBuf>,

    /// Delay before the first-run profile prompt
    #[serde(default = "default_setup_prompt_delay")]
    pub setup_prompt_delay_ms: u64,
}

impl ContentConfig {
    pub fn setup_prompt_delay(&self) -> Duration {
        Duration::from_millis(self.setup_prompt_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.catalog_path {
            Some(path) if !path.is_file() => Err(ValidationError::CatalogNotFound(
                path.display().to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            setup_prompt_delay_ms: default_setup_prompt_delay(),
        }
    }
}

fn default_setup_prompt_delay() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContentConfig::default();
        assert_eq!(config.setup_prompt_delay(), Duration::from_millis(1000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_catalog_file_is_rejected() {
        let config = ContentConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.yaml")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::CatalogNotFound(_))
        ));
    }

    #[test]
    fn test_existing_catalog_file_is_accepted() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ContentConfig {
            catalog_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

// TOML config adapter - Loads AppConfig from an explicitly named file

use std::path::Path;

use tracing::info;

use crate::config::AppConfig;
use crate::error::{VidbatchError, VidbatchResult};

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Load configuration, or the defaults when no file is given
    pub fn load(file_path: Option<&Path>) -> VidbatchResult<AppConfig> {
        match file_path {
            Some(path) => Self::load_file(path),
            None => Ok(AppConfig::default()),
        }
    }

    /// Read and parse a configuration file
    pub fn load_file(path: &Path) -> VidbatchResult<AppConfig> {
        if !path.is_file() {
            return Err(VidbatchError::Config {
                message: format!("config file does not exist: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| VidbatchError::Config {
            message: format!("failed to read config file {}: {}", path.display(), e),
        })?;

        let config = Self::parse(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(toml_content: &str) -> VidbatchResult<AppConfig> {
        toml::from_str(toml_content).map_err(|e| VidbatchError::Config {
            message: format!("failed to parse TOML config: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_REMUX_PARAMS, DEFAULT_TRANSCODE_PARAMS};
    use crate::domain::model::PrefixStyle;
    use std::path::PathBuf;

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = TomlConfigAdapter::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.transcode.encoder, "ffmpeg");
        assert_eq!(config.transcode.params, DEFAULT_TRANSCODE_PARAMS);
        assert_eq!(config.remux.params, DEFAULT_REMUX_PARAMS);
        assert_eq!(config.remux.output_dir, PathBuf::from("processed"));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = TomlConfigAdapter::parse(
            r#"
            [rename]
            style = "episode"
            only = ["webm"]

            [remux]
            skip_existing = true
            "#,
        )
        .unwrap();

        assert_eq!(config.rename.style, PrefixStyle::Episode);
        assert_eq!(config.rename.only, vec!["webm".to_string()]);
        assert!(config.remux.skip_existing);
        assert_eq!(config.remux.extensions, vec![".mp4".to_string()]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TomlConfigAdapter::parse("[rename]\nstyel = \"episode\"\n").unwrap_err();
        assert!(matches!(err, VidbatchError::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfigAdapter::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.is_fatal());
    }
}

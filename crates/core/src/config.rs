use crate::reader::Backend;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: Backend,
    pub recursive_default: bool,
    pub include_hidden_default: bool,
    pub lowercase_extension: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Auto,
            recursive_default: false,
            include_hidden_default: false,
            lowercase_extension: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("com", "exrename", "exrename")
        .context("could not determine the OS config directory")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    if !paths.config_path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(&paths.config_path).with_context(|| {
        format!(
            "could not read config file: {}",
            paths.config_path.display()
        )
    })?;

    let config = toml::from_str::<AppConfig>(&raw).context("could not parse config file")?;
    Ok(config)
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    let paths = app_paths()?;
    fs::create_dir_all(&paths.config_dir).with_context(|| {
        format!(
            "could not create config directory: {}",
            paths.config_dir.display()
        )
    })?;
    let body = toml::to_string_pretty(config).context("could not serialize config")?;
    fs::write(&paths.config_path, body).with_context(|| {
        format!(
            "could not write config file: {}",
            paths.config_path.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use crate::reader::Backend;

    #[test]
    fn defaults_use_auto_backend_and_lowercase_extension() {
        let config = AppConfig::default();
        assert_eq!(config.backend, Backend::Auto);
        assert!(config.lowercase_extension);
        assert!(!config.recursive_default);
    }

    #[test]
    fn partial_config_files_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("backend = \"embedded\"").expect("parse");
        assert_eq!(config.backend, Backend::Embedded);
        assert!(config.lowercase_extension);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.backend = Backend::Exiftool;
        config.recursive_default = true;

        let body = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&body).expect("parse");
        assert_eq!(parsed.backend, Backend::Exiftool);
        assert!(parsed.recursive_default);
    }
}

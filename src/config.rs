// src/config.rs
use crate::domain::error::DomainResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{instrument, trace};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_url: String,

    /// Directory holding cached bookmark images
    #[serde(default = "default_image_cache_dir")]
    pub image_cache_dir: String,
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/nestmark")
}

fn default_db_path() -> String {
    let db_dir = config_dir();

    // Ensure directory exists
    std::fs::create_dir_all(&db_dir).ok();

    db_dir
        .join("nestmark.db")
        .to_str()
        .unwrap_or("nestmark.db")
        .to_string()
}

fn default_image_cache_dir() -> String {
    config_dir()
        .join("image-cache")
        .to_str()
        .unwrap_or("image-cache")
        .to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_url: default_db_path(),
            image_cache_dir: default_image_cache_dir(),
        }
    }
}

// Load settings from the config file and environment variables
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    // Start with default settings
    let mut settings = Settings::default();

    // An explicit --config path wins over the standard location
    let config_path = config_file
        .map(Path::to_path_buf)
        .or_else(|| dirs::home_dir().map(|p| p.join(".config/nestmark/config.toml")));

    if let Some(config_path) = config_path {
        if config_path.exists() {
            trace!("Loading config from: {:?}", config_path);

            if let Ok(config_text) = std::fs::read_to_string(&config_path) {
                if let Ok(file_settings) = toml::from_str::<Settings>(&config_text) {
                    settings = file_settings;
                }
            }
        }
    }

    // Override with environment variables
    if let Ok(db_url) = std::env::var("NESTMARK_DB_URL") {
        trace!("Using NESTMARK_DB_URL from environment: {}", db_url);
        settings.db_url = db_url;
    }

    if let Ok(cache_dir) = std::env::var("NESTMARK_IMAGE_CACHE_DIR") {
        trace!("Using NESTMARK_IMAGE_CACHE_DIR from environment: {}", cache_dir);
        settings.image_cache_dir = cache_dir;
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::EnvGuard;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config_file(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();
        (temp_dir, config_path)
    }

    #[test]
    #[serial]
    fn given_no_config_when_load_then_defaults_used() {
        let _guard = EnvGuard::new();
        env::remove_var("NESTMARK_DB_URL");
        env::remove_var("NESTMARK_IMAGE_CACHE_DIR");

        let settings = load_settings(None).unwrap();

        assert!(settings.db_url.ends_with("nestmark.db"));
        assert!(settings.image_cache_dir.ends_with("image-cache"));
    }

    #[test]
    #[serial]
    fn given_config_file_when_load_then_file_values_used() {
        let _guard = EnvGuard::new();
        env::remove_var("NESTMARK_DB_URL");
        env::remove_var("NESTMARK_IMAGE_CACHE_DIR");

        let (_temp_dir, config_path) = create_temp_config_file(
            r#"
db_url = "/custom/path.db"
image_cache_dir = "/custom/cache"
"#,
        );

        let settings = load_settings(Some(&config_path)).unwrap();

        assert_eq!(settings.db_url, "/custom/path.db");
        assert_eq!(settings.image_cache_dir, "/custom/cache");
    }

    #[test]
    #[serial]
    fn given_partial_config_file_when_load_then_missing_fields_default() {
        let _guard = EnvGuard::new();
        env::remove_var("NESTMARK_DB_URL");
        env::remove_var("NESTMARK_IMAGE_CACHE_DIR");

        let (_temp_dir, config_path) = create_temp_config_file(r#"db_url = "/only/db.db""#);

        let settings = load_settings(Some(&config_path)).unwrap();

        assert_eq!(settings.db_url, "/only/db.db");
        assert!(settings.image_cache_dir.ends_with("image-cache"));
    }

    #[test]
    #[serial]
    fn given_env_vars_when_load_then_env_overrides_file() {
        let _guard = EnvGuard::new();
        let (_temp_dir, config_path) = create_temp_config_file(
            r#"
db_url = "/file/path.db"
image_cache_dir = "/file/cache"
"#,
        );
        env::set_var("NESTMARK_DB_URL", "/env/override.db");
        env::set_var("NESTMARK_IMAGE_CACHE_DIR", "/env/cache");

        let settings = load_settings(Some(&config_path)).unwrap();

        assert_eq!(settings.db_url, "/env/override.db");
        assert_eq!(settings.image_cache_dir, "/env/cache");
    }
}

use serde::Deserialize;
use std::path::PathBuf;
use config::{Config, ConfigError, Environment, File};

pub const SCRATCH_DIR: &str = "temp_employee_photos";
pub const ARCHIVE_FILE: &str = "employee_photos.zip";

pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub user_agent: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("PHOTO_BUNDLER"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Where downloads are staged and where the finished archive lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub scratch_dir: PathBuf,
    pub archive_path: PathBuf,
}

impl OutputLayout {
    pub fn new(scratch_dir: impl Into<PathBuf>, archive_path: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            archive_path: archive_path.into(),
        }
    }

    /// Both paths placed under `root`, using the fixed file names.
    pub fn under(root: &std::path::Path) -> Self {
        Self::new(root.join(SCRATCH_DIR), root.join(ARCHIVE_FILE))
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(SCRATCH_DIR, ARCHIVE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_relative_to_working_dir() {
        let layout = OutputLayout::default();
        assert_eq!(layout.scratch_dir, PathBuf::from("temp_employee_photos"));
        assert_eq!(layout.archive_path, PathBuf::from("employee_photos.zip"));
    }

    #[test]
    fn layout_under_root_keeps_file_names() {
        let layout = OutputLayout::under(std::path::Path::new("/tmp/run"));
        assert_eq!(layout.scratch_dir, PathBuf::from("/tmp/run/temp_employee_photos"));
        assert_eq!(layout.archive_path, PathBuf::from("/tmp/run/employee_photos.zip"));
    }

    #[test]
    fn default_config_sends_browser_user_agent() {
        assert_eq!(AppConfig::default().user_agent, "Mozilla/5.0");
    }

    #[test]
    fn loaded_defaults_match_struct_defaults() {
        let loaded = AppConfig::new().unwrap();
        let fallback = AppConfig::default();
        assert_eq!(loaded.log_level, fallback.log_level);
        assert_eq!(loaded.user_agent, fallback.user_agent);
    }
}

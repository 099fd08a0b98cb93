use adw::prelude::*;
use adw::Application;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::chat::store::ConversationStore;
use crate::error::ConfigError;

const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "text-davinci-003".to_string(),
            max_tokens: 100,
        }
    }
}

impl AppConfig {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("openai-chat.toml"))
    }

    /// Reads the user's config file, falling back to defaults, then applies
    /// `OPENAI_API_KEY` if it is set.
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.apply_env_key(std::env::var(API_KEY_ENV).ok());
        config
    }

    /// The config file alone. Anything that may be saved back must start from
    /// this, so an environment key never lands on disk.
    pub fn load_file() -> Self {
        Self::toml_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("cannot read config {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str::<AppConfig>(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn apply_env_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = key.trim().to_string();
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::toml_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        log::info!("saved config to {}", path.display());
        Ok(())
    }
}

pub fn build_ui(app: &Application, store: &Rc<ConversationStore>) {
    if let Some(window) = app.active_window() {
        window.present();
        return;
    }
    crate::ui::style::load_css();
    let config = AppConfig::load();
    if config.has_credentials() {
        crate::ui::main_window::show_main_window(app, config, store.clone());
    } else {
        log::info!("no API key configured, showing setup");
        crate::ui::credentials::show_credentials_window(app, AppConfig::load_file(), store.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_tokens, 100);
        assert!(!config.has_credentials());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("openai-chat.toml");
        let config = AppConfig {
            api_key: "sk-test".into(),
            base_url: "http://localhost:8080/v1".into(),
            model: "gpt-3.5-turbo-instruct".into(),
            max_tokens: 256,
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openai-chat.toml");
        fs::write(&path, "api_key = \"sk-partial\"\n").unwrap();
        let config = AppConfig::load_from(&path);
        assert_eq!(config.api_key, "sk-partial");
        assert_eq!(config.base_url, AppConfig::default().base_url);
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openai-chat.toml");
        fs::write(&path, "max_tokens = \"lots\"").unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn unreadable_path_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file; the error is not NotFound.
        assert_eq!(AppConfig::load_from(dir.path()), AppConfig::default());
    }

    #[test]
    fn env_key_is_not_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openai-chat.toml");
        AppConfig { api_key: "sk-file".into(), ..AppConfig::default() }.save_to(&path).unwrap();

        let mut effective = AppConfig::load_from(&path);
        effective.apply_env_key(Some("sk-env".into()));
        assert_eq!(effective.api_key, "sk-env");

        // The editable copy comes from the file only; saving it keeps the file key.
        let editable = AppConfig::load_from(&path);
        AppConfig { max_tokens: 64, ..editable }.save_to(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("sk-file"));
        assert!(!text.contains("sk-env"));
    }

    #[test]
    fn env_key_overrides_only_when_present() {
        let mut config = AppConfig { api_key: "from-file".into(), ..AppConfig::default() };
        config.apply_env_key(None);
        assert_eq!(config.api_key, "from-file");
        config.apply_env_key(Some("  ".into()));
        assert_eq!(config.api_key, "from-file");
        config.apply_env_key(Some("sk-env".into()));
        assert_eq!(config.api_key, "sk-env");
    }
}

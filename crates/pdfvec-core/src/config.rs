//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars into [`Settings`].

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Fixed name of the SQLite file written to the working directory.
pub const DB_FILENAME: &str = "pdf_embeddings.db";

/// Typed view over the merged configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Records buffered before the store commits a transaction.
    pub commit_interval: usize,
    /// Local directory holding `tokenizer.json`, `config.json` and the weights.
    pub model_dir: Option<String>,
    #[serde(deserialize_with = "figment::util::bool_from_str_or_int")]
    pub use_fake_embeddings: bool,
    /// Token limit per page; longer pages are truncated before inference.
    pub max_seq_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { commit_interval: 50, model_dir: None, use_fake_embeddings: false, max_seq_len: 256 }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.commit_interval == 0 {
            return Err(Error::InvalidConfig("commit_interval must be at least 1".to_string()));
        }
        if self.max_seq_len == 0 {
            return Err(Error::InvalidConfig("max_seq_len must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn model_dir(&self) -> Option<PathBuf> { self.model_dir.as_deref().map(expand_path) }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_files_or_env() {
        Jail::expect_with(|_jail| {
            let settings = Config::load().map_err(|e| e.to_string())?.settings().map_err(|e| e.to_string())?;
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.commit_interval, 50);
            Ok(())
        });
    }

    #[test]
    fn toml_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "commit_interval = 10\nmodel_dir = \"/opt/minilm\"")?;
            jail.set_env("APP_COMMIT_INTERVAL", "7");
            jail.set_env("APP_USE_FAKE_EMBEDDINGS", "1");
            let config = Config::load().map_err(|e| e.to_string())?;
            let settings = config.settings().map_err(|e| e.to_string())?;
            assert_eq!(settings.commit_interval, 7);
            assert!(settings.use_fake_embeddings);
            assert_eq!(settings.model_dir(), Some(PathBuf::from("/opt/minilm")));
            Ok(())
        });
    }

    #[test]
    fn env_specific_file_is_merged() {
        Jail::expect_with(|jail| {
            jail.set_env("RUST_ENV", "test");
            jail.create_file("config.test.toml", "max_seq_len = 128")?;
            let settings = Config::load().map_err(|e| e.to_string())?.settings().map_err(|e| e.to_string())?;
            assert_eq!(settings.max_seq_len, 128);
            Ok(())
        });
    }

    #[test]
    fn zero_commit_interval_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("APP_COMMIT_INTERVAL", "0");
            let config = Config::load().map_err(|e| e.to_string())?;
            assert!(matches!(config.settings(), Err(Error::InvalidConfig(_))));
            Ok(())
        });
    }

    #[test]
    fn expand_path_reads_env_vars() {
        Jail::expect_with(|jail| {
            jail.set_env("PDFVEC_TEST_MODEL_ROOT", "/data/models");
            assert_eq!(expand_path("$PDFVEC_TEST_MODEL_ROOT/minilm"), PathBuf::from("/data/models/minilm"));
            Ok(())
        });
    }

    #[test]
    fn model_dir_setting_is_expanded() {
        Jail::expect_with(|jail| {
            jail.set_env("PDFVEC_TEST_MODEL_ROOT", "/srv");
            jail.set_env("APP_MODEL_DIR", "${PDFVEC_TEST_MODEL_ROOT}/minilm");
            let settings = Config::load().map_err(|e| e.to_string())?.settings().map_err(|e| e.to_string())?;
            assert_eq!(settings.model_dir(), Some(PathBuf::from("/srv/minilm")));
            Ok(())
        });
    }
}

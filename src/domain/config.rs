use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a requirements project.
///
/// This controls whether the optional review service is consulted when
/// requirements are added, and how it is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether new requirement text is sent for review before it is added.
    pub validate: bool,

    /// Whether a parent is proposed for requirements added without one.
    pub suggest_parent: bool,

    /// Chat-completions endpoint of the review service.
    pub endpoint: String,

    /// Model name sent with each review request.
    pub model: String,

    /// Name of the environment variable holding the review service API key.
    ///
    /// When the variable is unset, review is skipped.
    pub api_key_env: String,

    /// Request timeout for the review service, in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate: true,
            suggest_parent: true,
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The review features this configuration allows.
    ///
    /// Callers narrow this further with [`Features::without_validation`] and
    /// [`Features::without_parent_suggestion`].
    #[must_use]
    pub const fn features(&self) -> Features {
        Features {
            validation_enabled: self.validate,
            parent_suggestion_enabled: self.suggest_parent,
        }
    }
}

/// Which optional review steps run when a requirement is added.
///
/// This is passed explicitly into operations rather than read from the
/// environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// Send the requirement text for review and offer the recommended
    /// rewrite.
    pub validation_enabled: bool,
    /// Offer a proposed parent when none was given.
    pub parent_suggestion_enabled: bool,
}

impl Features {
    /// All review steps disabled.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            validation_enabled: false,
            parent_suggestion_enabled: false,
        }
    }

    /// Disable validation if `disable` is set.
    #[must_use]
    pub const fn without_validation(mut self, disable: bool) -> Self {
        if disable {
            self.validation_enabled = false;
        }
        self
    }

    /// Disable parent suggestion if `disable` is set.
    #[must_use]
    pub const fn without_parent_suggestion(mut self, disable: bool) -> Self {
        if disable {
            self.parent_suggestion_enabled = false;
        }
        self
    }

    /// Whether any step needs the review service.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.validation_enabled || self.parent_suggestion_enabled
    }
}

const fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_true")]
        validate: bool,

        #[serde(default = "default_true")]
        suggest_parent: bool,

        #[serde(default = "default_endpoint")]
        endpoint: String,

        #[serde(default = "default_model")]
        model: String,

        #[serde(default = "default_api_key_env")]
        api_key_env: String,

        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                validate,
                suggest_parent,
                endpoint,
                model,
                api_key_env,
                timeout_secs,
            } => Self {
                validate,
                suggest_parent,
                endpoint,
                model,
                api_key_env,
                timeout_secs,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            validate: config.validate,
            suggest_parent: config.suggest_parent,
            endpoint: config.endpoint,
            model: config.model,
            api_key_env: config.api_key_env,
            timeout_secs: config.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nvalidate = false\nmodel = \"gpt-4o-mini\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert!(!config.validate);
        assert!(config.suggest_parent);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nvalidate = \"maybe\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let config = Config {
            suggest_parent: false,
            ..Config::default()
        };

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn features_follow_config_and_flags() {
        let config = Config {
            suggest_parent: false,
            ..Config::default()
        };

        let features = config.features();
        assert!(features.validation_enabled);
        assert!(!features.parent_suggestion_enabled);
        assert!(features.any());

        let features = features.without_validation(true);
        assert_eq!(features, Features::none());
        assert!(!features.any());
    }

    #[test]
    fn flags_never_enable_features() {
        let features = Features::none()
            .without_validation(false)
            .without_parent_suggestion(false);
        assert_eq!(features, Features::none());
    }
}

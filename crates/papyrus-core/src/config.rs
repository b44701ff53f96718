use std::path::Path;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub chat: ChatConfig,
    pub splitter: SplitterSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub embedding_model: Option<String>,
    /// Name of the env var holding the API key.
    pub api_key_env: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub top_k: usize,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SplitterSection {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            chat: ChatConfig::default(),
            splitter: SplitterSection::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            embedding_model: Some("text-embedding-3-small".into()),
            api_key_env: "PAPYRUS_API_KEY".into(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            request_timeout_secs: 120,
        }
    }
}

impl Default for SplitterSection {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PAPYRUS_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("PAPYRUS_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("PAPYRUS_EMBEDDING_MODEL") {
            self.llm.embedding_model = Some(v);
        }
    }

    /// Resolve the API key from the configured env var. Empty when unset.
    #[must_use]
    pub fn api_key(&self) -> String {
        std::env::var(&self.llm.api_key_env).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let config = Config::load(Path::new("/nonexistent/papyrus.toml")).unwrap();
        assert_eq!(config.llm.max_tokens, 2000);
        assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.chat.top_k, 4);
        assert_eq!(config.splitter.chunk_size, 1000);
        assert_eq!(config.splitter.chunk_overlap, 200);
    }

    #[test]
    fn parse_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papyrus.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"
[llm]
base_url = "http://localhost:8000/v1"
model = "local-model"
temperature = 0.2

[chat]
top_k = 2

[splitter]
chunk_size = 500
chunk_overlap = 50
"#
        )
        .unwrap();

        for key in ["PAPYRUS_BASE_URL", "PAPYRUS_MODEL", "PAPYRUS_EMBEDDING_MODEL"] {
            unsafe { std::env::remove_var(key) };
        }

        let config = Config::load(&path).unwrap();
        assert_eq!(config.llm.base_url, "http://localhost:8000/v1");
        assert_eq!(config.llm.model, "local-model");
        assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.chat.top_k, 2);
        assert_eq!(config.splitter.chunk_size, 500);
        // Unset fields keep their defaults.
        assert_eq!(config.llm.max_tokens, 2000);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[llm\nbase_url = ").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn env_overrides() {
        let mut config = Config::default();
        unsafe { std::env::set_var("PAPYRUS_MODEL", "override-model") };
        config.apply_env_overrides();
        unsafe { std::env::remove_var("PAPYRUS_MODEL") };
        assert_eq!(config.llm.model, "override-model");
    }
}

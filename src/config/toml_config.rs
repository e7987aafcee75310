use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ImpactError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STORE_PATH: &str = "./data";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub explanation: ExplanationConfig,
    pub generator: Option<GeneratorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationMode {
    #[default]
    Fixed,
    Augmented,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplanationConfig {
    #[serde(default)]
    pub mode: ExplanationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub temperature: Option<f32>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ImpactError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ImpactError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GENERATOR_API_KEY})
    ///
    /// Unset variables are left as written so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ImpactError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("store.path", &self.store.path)?;

        if let Some(generator) = &self.generator {
            validation::validate_url("generator.endpoint", &generator.endpoint)?;
            if let Some(timeout) = generator.timeout_seconds {
                validation::validate_range("generator.timeout_seconds", timeout, 1, 300)?;
            }
            if let Some(temperature) = generator.temperature {
                validation::validate_range("generator.temperature", temperature, 0.0, 2.0)?;
            }
            if let Some(key) = &generator.api_key {
                if key.starts_with("${") {
                    return Err(ImpactError::InvalidConfigValueError {
                        field: "generator.api_key".to_string(),
                        value: key.clone(),
                        reason: "Environment variable is not set".to_string(),
                    });
                }
            }
        }

        if self.explanation.mode == ExplanationMode::Augmented {
            validation::validate_required_field("generator", &self.generator)?;
        }

        Ok(())
    }

    pub fn is_augmented(&self) -> bool {
        self.explanation.mode == ExplanationMode::Augmented
    }
}

impl ConfigProvider for TomlConfig {
    fn store_path(&self) -> &str {
        &self.store.path
    }

    fn augmented(&self) -> bool {
        self.is_augmented()
    }

    fn generator_endpoint(&self) -> Option<&str> {
        self.generator.as_ref().map(|g| g.endpoint.as_str())
    }

    fn generator_model(&self) -> &str {
        self.generator
            .as_ref()
            .and_then(|g| g.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
    }

    fn generator_api_key(&self) -> Option<&str> {
        self.generator.as_ref().and_then(|g| g.api_key.as_deref())
    }

    fn generator_timeout_seconds(&self) -> u64 {
        self.generator
            .as_ref()
            .and_then(|g| g.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn generator_temperature(&self) -> f32 {
        self.generator
            .as_ref()
            .and_then(|g| g.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

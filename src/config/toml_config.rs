use crate::utils::error::{CaseStudyError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub documents_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            documents_dir: "./data/projects".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub assets_dir: String,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            assets_dir: "./data/uploads".to_string(),
            public_base_url: "http://localhost:8080/uploads".to_string(),
            max_upload_bytes: 5 * 1024 * 1024,
            allowed_extensions: ["png", "jpg", "jpeg", "gif", "webp", "svg"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CaseStudyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CaseStudyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CASEFOLIO_ASSETS})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CaseStudyError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("storage.documents_dir", &self.storage.documents_dir)?;
        validation::validate_path("uploads.assets_dir", &self.uploads.assets_dir)?;
        validation::validate_url("uploads.public_base_url", &self.uploads.public_base_url)?;
        validation::validate_positive_number(
            "uploads.max_upload_bytes",
            self.uploads.max_upload_bytes,
            1,
        )?;
        if self.uploads.allowed_extensions.is_empty() {
            return Err(CaseStudyError::validation(
                "uploads.allowed_extensions",
                "at least one extension is required",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(CaseStudyError::validation(
                "logging.level",
                format!(
                    "Unsupported level '{}'. Valid levels: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config().map_err(|e| match e {
            CaseStudyError::ValidationFailure { field, reason } => CaseStudyError::ConfigError {
                message: format!("{}: {}", field, reason),
            },
            other => other,
        })
    }
}

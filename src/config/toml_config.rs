use crate::config::ClientConfig;
use crate::utils::error::{BloodBankError, Result};
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BloodBankError::IoError)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// 從 TOML 字串解析配置；缺少的段落使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BloodBankError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| BloodBankError::ConfigError {
            message: format!("TOML serialization error: {}", e),
        })
    }
}

use crate::utils::error::{KgError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RESULTS_PAGE_SIZE: usize = 50;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub features: FeaturesConfig,
    pub export: ExportConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Serve every call from in-memory fixtures instead of the backend.
    pub use_mock: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            use_mock: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub enable_map: bool,
    pub enable_search: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            enable_map: true,
            enable_search: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "./output".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Rows per page in the SPARQL results table.
    pub page_size: usize,
    pub debounce_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_RESULTS_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KgError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| KgError::InvalidConfigValue {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| KgError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// `KG_API_BASE_URL`, `KG_API_TIMEOUT`, `KG_ENABLE_MAP`, `KG_ENABLE_SEARCH`.
    /// Flags are enabled only by the literal `true`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("KG_API_BASE_URL").filter(|v| !v.is_empty()) {
            self.api.base_url = base_url;
        }
        if let Some(timeout) = lookup("KG_API_TIMEOUT").filter(|v| !v.is_empty()) {
            self.api.timeout_ms =
                timeout
                    .trim()
                    .parse()
                    .map_err(|_| KgError::InvalidConfigValue {
                        field: "KG_API_TIMEOUT".to_string(),
                        value: timeout.clone(),
                        reason: "expected a number of milliseconds".to_string(),
                    })?;
        }
        if let Some(flag) = lookup("KG_ENABLE_MAP") {
            self.features.enable_map = flag == "true";
        }
        if let Some(flag) = lookup("KG_ENABLE_SEARCH") {
            self.features.enable_search = flag == "true";
        }
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_range("api.timeout_ms", self.api.timeout_ms, 1, 600_000)?;
        validation::validate_positive_number("query.page_size", self.query.page_size, 1)?;
        validation::validate_path("export.output_dir", &self.export.output_dir)?;
        Ok(())
    }

    pub fn require_search(&self) -> Result<()> {
        if !self.features.enable_search {
            return Err(KgError::config(
                "search is disabled (features.enable_search = false)",
            ));
        }
        Ok(())
    }

    pub fn require_map(&self) -> Result<()> {
        if !self.features.enable_map {
            return Err(KgError::config("map is disabled (features.enable_map = false)"));
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_ms, 30_000);
        assert!(config.features.enable_map);
        assert_eq!(config.query.page_size, 50);
        assert_eq!(config.query.debounce_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://kg.example.org/api"
timeout_ms = 5000
use_mock = true

[features]
enable_map = false

[export]
output_dir = "./exports"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api.base_url, "https://kg.example.org/api");
        assert_eq!(config.api.timeout_ms, 5000);
        assert!(config.api.use_mock);
        assert!(!config.features.enable_map);
        assert!(config.features.enable_search);
        assert_eq!(config.export.output_dir, "./exports");
        assert!(config.require_map().is_err());
        assert!(config.require_search().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KG_TEST_SUBST_URL", "https://test.api.com");

        let toml_content = r#"
[api]
base_url = "${KG_TEST_SUBST_URL}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://test.api.com");

        std::env::remove_var("KG_TEST_SUBST_URL");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("KG_API_BASE_URL", "https://override.example/api"),
            ("KG_API_TIMEOUT", "1500"),
            ("KG_ENABLE_MAP", "false"),
            ("KG_ENABLE_SEARCH", "yes"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.base_url, "https://override.example/api");
        assert_eq!(config.api.timeout_ms, 1500);
        assert!(!config.features.enable_map);
        // only the literal "true" enables a feature
        assert!(!config.features.enable_search);
    }

    #[test]
    fn test_bad_timeout_override_is_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides_from(|k| {
            (k == "KG_API_TIMEOUT").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(KgError::InvalidConfigValue { .. })));
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[api]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.query.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "http://127.0.0.1:9999/api"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9999/api");
    }
}

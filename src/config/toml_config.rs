use crate::core::estimator::{KeywordEstimator, PricingConfig, DEFAULT_DELAY_MS};
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const MAX_DELAY_MS: u64 = 60_000;
pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorFileConfig {
    pub estimator: EstimatorSection,
    pub pricing: PricingConfig,
    pub batch: Option<BatchConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSection {
    pub simulated_delay_ms: u64,
}

impl Default for EstimatorSection {
    fn default() -> Self {
        Self {
            simulated_delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub input_file: Option<String>,
    pub output_path: String,
    pub output_formats: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_file: None,
            output_path: "./output".to_string(),
            output_formats: vec!["csv".to_string()],
        }
    }
}

impl BatchConfig {
    pub fn writes_json(&self) -> bool {
        self.output_formats.iter().any(|f| f == "json")
    }

    pub fn writes_csv(&self) -> bool {
        self.output_formats.iter().any(|f| f == "csv")
    }
}

impl EstimatorFileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimateError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EstimateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOURLY_RATE})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_range(
            "estimator.simulated_delay_ms",
            self.estimator.simulated_delay_ms,
            0,
            MAX_DELAY_MS,
        )?;

        validation::validate_rate("pricing.hourly_rate_per_mover", self.pricing.hourly_rate_per_mover)?;
        validation::validate_rate("pricing.per_mile_rate", self.pricing.per_mile_rate)?;
        validation::validate_rate("pricing.materials_min_ratio", self.pricing.materials_min_ratio)?;
        validation::validate_rate("pricing.materials_max_ratio", self.pricing.materials_max_ratio)?;

        if self.pricing.materials_min_ratio > self.pricing.materials_max_ratio {
            return Err(EstimateError::InvalidConfigValueError {
                field: "pricing.materials_min_ratio".to_string(),
                value: self.pricing.materials_min_ratio.to_string(),
                reason: format!(
                    "Must not exceed pricing.materials_max_ratio ({})",
                    self.pricing.materials_max_ratio
                ),
            });
        }

        if let Some(batch) = &self.batch {
            validation::validate_path("batch.output_path", &batch.output_path)?;
            if let Some(input) = &batch.input_file {
                validation::validate_path("batch.input_file", input)?;
            }
            if batch.output_formats.is_empty() {
                return Err(EstimateError::ConfigValidationError {
                    field: "batch.output_formats".to_string(),
                    message: "At least one output format is required".to_string(),
                });
            }
            for format in &batch.output_formats {
                validation::validate_one_of("batch.output_formats", format, &OUTPUT_FORMATS)?;
            }
        }

        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.estimator.simulated_delay_ms)
    }

    pub fn build_estimator(&self) -> KeywordEstimator {
        KeywordEstimator::new(self.delay(), self.pricing)
    }

    /// 命令列參數優先，其次是 [batch].input_file
    pub fn resolve_input_file(&self, cli_override: Option<&str>) -> Result<String> {
        cli_override
            .map(str::to_string)
            .or_else(|| self.batch.as_ref().and_then(|b| b.input_file.clone()))
            .ok_or_else(|| EstimateError::MissingConfigError {
                field: "batch.input_file".to_string(),
            })
    }

    /// 取得批次設定，沒有 [batch] 區段時使用預設值
    pub fn batch_or_default(&self) -> BatchConfig {
        self.batch.clone().unwrap_or_default()
    }
}

impl Validate for EstimatorFileConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

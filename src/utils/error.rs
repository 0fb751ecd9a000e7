use thiserror::Error;

/// 對使用者顯示的通用估價失敗訊息
pub const GENERIC_ESTIMATE_FAILURE: &str =
    "We encountered an error generating your estimate. Please try again or call us directly.";

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}': {value} - {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid quote input for '{field}': {value} - {reason}")]
    InvalidQuoteInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Estimation failed: {message}")]
    EstimationFailed { message: String },

    #[error("Estimate was cancelled before it completed")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Input,
    Estimation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimateError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::InvalidQuoteInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EstimateError::ConfigValidationError { .. }
            | EstimateError::InvalidConfigValueError { .. }
            | EstimateError::MissingConfigError { .. } => ErrorCategory::Config,
            EstimateError::InvalidQuoteInput { .. } => ErrorCategory::Input,
            EstimateError::EstimationFailed { .. } | EstimateError::Cancelled => {
                ErrorCategory::Estimation
            }
            EstimateError::IoError(_)
            | EstimateError::CsvError(_)
            | EstimateError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EstimateError::Cancelled => ErrorSeverity::Low,
            EstimateError::InvalidQuoteInput { .. } | EstimateError::EstimationFailed { .. } => {
                ErrorSeverity::Medium
            }
            EstimateError::ConfigValidationError { .. }
            | EstimateError::InvalidConfigValueError { .. }
            | EstimateError::MissingConfigError { .. }
            | EstimateError::CsvError(_)
            | EstimateError::SerializationError(_) => ErrorSeverity::High,
            EstimateError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 結束碼：表單或設定錯誤為 1，其餘 (包含取消) 為 2
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Config => 1,
            ErrorCategory::Estimation | ErrorCategory::System => 2,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EstimateError::ConfigValidationError { field, .. }
            | EstimateError::InvalidConfigValueError { field, .. } => {
                format!("Check the '{}' entry in your configuration file", field)
            }
            EstimateError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration or pass it on the command line", field)
            }
            EstimateError::InvalidQuoteInput { field, .. } => {
                format!("Correct the '{}' field and submit the quote again", field)
            }
            EstimateError::EstimationFailed { .. } => {
                "Try again, or call us directly for a manual quote".to_string()
            }
            EstimateError::Cancelled => "Submit the quote again when ready".to_string(),
            EstimateError::CsvError(_) => {
                "Make sure the input CSV has inventory_description and distance_miles headers"
                    .to_string()
            }
            EstimateError::SerializationError(_) => {
                "Check that the input is well-formed JSON".to_string()
            }
            EstimateError::IoError(_) => {
                "Check that the path exists and is readable/writable".to_string()
            }
        }
    }

    /// 面向終端使用者的訊息；估價錯誤一律使用通用訊息
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Estimation => GENERIC_ESTIMATE_FAILURE.to_string(),
            ErrorCategory::Input => match self {
                EstimateError::InvalidQuoteInput { field, reason, .. } => {
                    format!("{}: {}", field, reason)
                }
                other => other.to_string(),
            },
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimateError>;

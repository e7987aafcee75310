use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImpactError {
    #[error("Invalid input for {field} ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Explanation generation failed: {message}")]
    GenerationFailure { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
}

/// Failure reported by a text-generation collaborator.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("generator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed generator response: {0}")]
    MalformedResponse(String),

    #[error("generator returned empty text")]
    EmptyResponse,
}

impl From<GenerationError> for ImpactError {
    fn from(err: GenerationError) -> Self {
        ImpactError::GenerationFailure {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Generation,
    Configuration,
    Storage,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImpactError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        ImpactError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ImpactError::InvalidInput { .. } => ErrorCategory::Input,
            ImpactError::GenerationFailure { .. } => ErrorCategory::Generation,
            ImpactError::ApiError(_) => ErrorCategory::Network,
            ImpactError::IoError(_)
            | ImpactError::SerializationError(_)
            | ImpactError::NotFound { .. } => ErrorCategory::Storage,
            ImpactError::ConfigError { .. }
            | ImpactError::ConfigValidationError { .. }
            | ImpactError::InvalidConfigValueError { .. }
            | ImpactError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ImpactError::NotFound { .. } => ErrorSeverity::Low,
            ImpactError::GenerationFailure { .. } | ImpactError::ApiError(_) => {
                ErrorSeverity::Medium
            }
            ImpactError::InvalidInput { .. }
            | ImpactError::ConfigError { .. }
            | ImpactError::ConfigValidationError { .. }
            | ImpactError::InvalidConfigValueError { .. }
            | ImpactError::MissingConfigError { .. } => ErrorSeverity::High,
            ImpactError::IoError(_) | ImpactError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImpactError::InvalidInput { field, reason, .. } => {
                format!("The value given for '{}' is not usable: {}", field, reason)
            }
            ImpactError::GenerationFailure { .. } => {
                "We couldn't write an explanation for the plates-saved estimate right now."
                    .to_string()
            }
            ImpactError::ApiError(_) => "Could not reach the text generation service.".to_string(),
            ImpactError::IoError(e) => format!("Could not access local data: {}", e),
            ImpactError::SerializationError(_) => {
                "Stored post data is corrupted or unreadable.".to_string()
            }
            ImpactError::NotFound { entity, id } => format!("No {} with id {}.", entity, id),
            other => format!("Configuration problem: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        if let ImpactError::InvalidInput { field, .. } = self {
            return match field.as_str() {
                "number_of_posts" => "Enter a finite, non-negative number of posts and try again.",
                "voice_command" => "Say a command such as \"how do I store rice\" or \"find food near me\".",
                "food_name" | "freshness" => {
                    "Describe the leftover and how fresh it is before posting."
                }
                "expiration_date" => "Enter the expiration date as YYYY-MM-DD, e.g. 2026-10-20.",
                "barcode" => "Type at least 3 characters from the barcode, or all digits of an EAN/UPC code.",
                _ => "Check the value you entered and try again.",
            };
        }

        match self.category() {
            ErrorCategory::Input => "Check the value you entered and try again.",
            ErrorCategory::Generation => {
                "Retry later, or run without --augmented to use the standard explanation."
            }
            ErrorCategory::Network => "Check the generator endpoint and your network connection.",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags.",
            ErrorCategory::Storage => "Check the store path and its permissions.",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImpactError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HazardMapError {
    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed page from {url}: {reason}")]
    MalformedPage { url: String, reason: String },

    #[error("Fetch of {url} was cancelled")]
    Cancelled { url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HazardMapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::Transport { .. } => ErrorCategory::Network,
            Self::MalformedPage { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::ProcessingError { .. } => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
            Self::Cancelled { .. } => ErrorCategory::Interrupted,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Interrupted => ErrorSeverity::Low,
            // 網路錯誤通常可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI. An interrupted run did not finish, so it is never 0.
    pub fn exit_code(&self) -> i32 {
        if self.category() == ErrorCategory::Interrupted {
            return 130;
        }

        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check TLS and proxy settings of the HTTP client",
            Self::Transport { .. } => {
                "Check that the API endpoint is reachable, or raise --page-timeout-secs"
            }
            Self::MalformedPage { .. } => {
                "Verify the endpoint returns a paginated collection (data + meta.pagination)"
            }
            Self::Cancelled { .. } => "Run the command again to fetch the remaining pages",
            Self::CsvError(_) | Self::SerializationError(_) | Self::ProcessingError { .. } => {
                "Inspect the fetched records for unexpected values"
            }
            Self::IoError(_) => "Check that the output directory exists and is writable",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Review the command-line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download map data: {}", self),
            ErrorCategory::Data => format!("Received data could not be processed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
            ErrorCategory::Interrupted => format!("Interrupted: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, HazardMapError>;

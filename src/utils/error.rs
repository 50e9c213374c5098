use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status} for {url}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        url: String,
        body: String,
    },

    #[error("{service} returned an empty response for {context}")]
    EmptyResponse {
        service: &'static str,
        context: String,
    },

    #[error("{service} pointed to a URL outside its configured host: {url}")]
    ForeignUrl { service: &'static str, url: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RouterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RouterError::Http(_) => ErrorCategory::Network,
            RouterError::Status { .. }
            | RouterError::EmptyResponse { .. }
            | RouterError::ForeignUrl { .. } => ErrorCategory::Remote,
            RouterError::Serialization(_) => ErrorCategory::Data,
            RouterError::Io(_) => ErrorCategory::System,
            RouterError::Url(_)
            | RouterError::Config { .. }
            | RouterError::MissingConfig { .. }
            | RouterError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RouterError::Http(_) => {
                "Check network connectivity and that the API base URL is reachable".to_string()
            }
            RouterError::Status { status, .. } if *status == 401 || *status == 403 => {
                "Check that the API key is valid and has the required permissions".to_string()
            }
            RouterError::Status { status, .. } if *status == 404 => {
                "Check the API base URL and the configured identifiers".to_string()
            }
            RouterError::Status { .. } => {
                "The remote service rejected the request; retry on the next run".to_string()
            }
            RouterError::EmptyResponse { .. } => {
                "The remote service returned no data; verify the record exists".to_string()
            }
            RouterError::ForeignUrl { .. } => {
                "The response linked to another host; check for a proxy or a misconfigured base URL"
                    .to_string()
            }
            RouterError::Serialization(_) => {
                "The response body did not match the expected JSON shape".to_string()
            }
            RouterError::Io(_) => "Check file permissions and paths".to_string(),
            RouterError::Url(_) => "Use an absolute http:// or https:// URL".to_string(),
            RouterError::Config { .. } => "Review the configuration file".to_string(),
            RouterError::MissingConfig { field } => {
                format!("Set {} in the environment or the configuration file", field)
            }
            RouterError::InvalidConfigValue { field, .. } => {
                format!("Correct the value of {}", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the remote service: {}", self),
            ErrorCategory::Remote => format!("The remote service reported a problem: {}", self),
            ErrorCategory::Data => format!("Unexpected data received: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;

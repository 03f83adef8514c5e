use thiserror::Error;

/// Failures of the outbound directions request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Directions provider unreachable: {0}")]
    Unreachable(String),

    #[error("Directions provider returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Directions request timed out")]
    Timeout,

    #[error("Failed to read directions response: {0}")]
    Io(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Unreachable(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Io(err.to_string())
        }
    }
}

/// Failures turning a response body into a route.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Type mismatch at {path}: expected {expected}")]
    TypeMismatch { path: String, expected: &'static str },

    #[error("Invalid polyline at {path}: {reason}")]
    InvalidPolyline { path: String, reason: String },

    #[error("Provider status {status}: {message}")]
    ProviderStatus { status: String, message: String },
}

#[derive(Error, Debug)]
pub enum RouteError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Directions provider returned an empty body")]
    EmptyBody,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RouteError {
    /// Whether the same request may succeed if simply issued again.
    pub fn is_retryable(&self) -> bool {
        match self {
            RouteError::Fetch(FetchError::Unreachable(_))
            | RouteError::Fetch(FetchError::Timeout)
            | RouteError::Fetch(FetchError::Io(_))
            | RouteError::EmptyBody => true,
            RouteError::Fetch(FetchError::HttpStatus(code)) => *code == 429 || *code >= 500,
            RouteError::Decode(DecodeError::ProviderStatus { status, .. }) => {
                status == "OVER_QUERY_LIMIT" || status == "UNKNOWN_ERROR"
            }
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RouteError::Fetch(FetchError::Unreachable(_)) => {
                "Could not reach the directions service".to_string()
            }
            RouteError::Fetch(FetchError::Timeout) => {
                "The directions service took too long to answer".to_string()
            }
            RouteError::Fetch(FetchError::HttpStatus(code)) => {
                format!("The directions service rejected the request (HTTP {})", code)
            }
            RouteError::Fetch(FetchError::Io(_)) | RouteError::EmptyBody => {
                "The directions service sent an incomplete answer".to_string()
            }
            RouteError::Decode(DecodeError::ProviderStatus { status, .. }) => {
                format!("No route available ({})", status)
            }
            RouteError::Decode(_) => "The directions answer could not be understood".to_string(),
            RouteError::ConfigError { .. }
            | RouteError::InvalidConfigValueError { .. }
            | RouteError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            RouteError::IoError(e) => format!("File error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RouteError::Fetch(FetchError::HttpStatus(401 | 403)) => {
                "Check that the API key is valid and the Directions API is enabled"
            }
            RouteError::Decode(DecodeError::ProviderStatus { status, .. })
                if status == "REQUEST_DENIED" =>
            {
                "Check that the API key is valid and the Directions API is enabled"
            }
            RouteError::Decode(DecodeError::ProviderStatus { status, .. })
                if status == "NOT_FOUND" || status == "ZERO_RESULTS" =>
            {
                "Pick a destination reachable by road"
            }
            RouteError::ConfigError { .. }
            | RouteError::InvalidConfigValueError { .. }
            | RouteError::MissingConfigError { .. }
            | RouteError::IoError(_) => "Fix the configuration and run again",
            e if e.is_retryable() => "Try the request again in a moment",
            _ => "Report the response body to the maintainers",
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;

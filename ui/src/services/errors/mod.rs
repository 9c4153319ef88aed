use thiserror::Error;

/// Failure reported by one of the backend collaborators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid response format: {message}")]
    Decode { message: String },

    #[error("Not authorized")]
    Unauthorized,

    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.to_string(),
            id: id.into(),
        }
    }

    /// Whether re-issuing the same request could succeed.
    /// Nothing retries automatically; this only decides the wording shown to the user.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Message suitable for the dismissible error banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network { .. } => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Http { status, .. } => format!("The server rejected the request ({status})"),
            ApiError::Decode { .. } => "The server sent an unexpected response".to_string(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::NotFound { resource, .. } => format!("{resource} no longer exists"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            ApiError::http(status.as_u16(), err.to_string())
        } else {
            ApiError::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors produced by the wizard itself. None of them are fatal: every variant
/// leaves the wizard interactive and the user can retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("Step {step} is incomplete: {message}")]
    Validation { step: u8, message: String },

    #[error("A connection test is already running")]
    ConnectionTestInFlight,

    #[error("Tables are already being loaded")]
    CatalogLoadInFlight,

    #[error("The migration is already being submitted")]
    SubmissionInFlight,

    #[error("Submit is only available on the last step (currently on step {current_step})")]
    NotOnLastStep { current_step: u8 },

    #[error("Result discarded because the wizard was reset or closed")]
    Discarded,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl WizardError {
    pub fn user_message(&self) -> String {
        match self {
            WizardError::Api(api) => api.user_message(),
            WizardError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type WizardResult<T> = Result<T, WizardError>;

/// Failure reading or writing the persisted login session
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Session storage unavailable: {message}")]
    Storage { message: String },

    #[error("Stored session could not be read: {message}")]
    Corrupt { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::network("connection reset").is_retryable());
        assert!(ApiError::http(503, "unavailable").is_retryable());
        assert!(ApiError::http(429, "slow down").is_retryable());
        assert!(!ApiError::http(400, "bad name").is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::http(422, "Migration name already exists");
        assert_eq!(err.user_message(), "Migration name already exists");

        let err = ApiError::http(500, "  ");
        assert_eq!(err.user_message(), "The server rejected the request (500)");
    }

    #[test]
    fn test_wizard_error_wraps_api_error() {
        let err: WizardError = ApiError::Unauthorized.into();
        assert_eq!(
            err.user_message(),
            "Your session has expired. Please sign in again."
        );

        let err = WizardError::Validation {
            step: 1,
            message: "Name must be at least 3 characters".to_string(),
        };
        assert_eq!(err.user_message(), "Name must be at least 3 characters");
        assert_eq!(
            err.to_string(),
            "Step 1 is incomplete: Name must be at least 3 characters"
        );
    }
}

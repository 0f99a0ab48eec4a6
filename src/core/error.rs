use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

const UNHANDLED_TITLE: &str = "An unhandled error occurred";

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Malformed request input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document store operation errors
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short variant name reported as the error `type`
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::Database(_) => "Database",
            AppError::Configuration(_) => "Configuration",
            AppError::HttpClient(_) => "HttpClient",
            AppError::Json(_) => "Json",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Render the JSON error body, tagged with the request's trace id if known
    pub fn to_response(&self, trace_id: Option<&str>) -> HttpResponse {
        let status_code = self.status_code();

        // Server faults keep their details out of release responses.
        let (title, message) = if status_code.is_server_error() {
            let detail = cfg!(debug_assertions).then(|| self.to_string());
            (UNHANDLED_TITLE.to_string(), detail)
        } else {
            (self.to_string(), Some(self.to_string()))
        };

        let mut error = serde_json::json!({
            "code": status_code.as_u16(),
            "type": self.kind(),
            "title": title,
            "message": message,
        });
        if let Some(trace_id) = trace_id {
            error["traceId"] = serde_json::Value::from(trace_id);
        }

        HttpResponse::build(status_code).json(serde_json::json!({ "error": error }))
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_response(None)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

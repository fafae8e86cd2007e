use axum::http::StatusCode;
use thiserror::Error;

/// Failures talking to the Google Sheets API.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error(
        "spreadsheet not found or not shared; share it with {service_account} (Editor) and verify the id"
    )]
    SpreadsheetNotFound { service_account: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("Google Sheets error: {0}")]
    Api(String),

    #[error("Google Sheets request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<SheetsError> for AppError {
    fn from(err: SheetsError) -> Self {
        let status = match &err {
            SheetsError::SpreadsheetNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Transport failure: connect, TLS, body read.
    Http(reqwest::Error),
    /// The API answered with a non-2xx status.
    Status { status: u16, body: String },
    /// A bulk operation reported `success: false` or an `error` field.
    Bulk(String),
    /// An identifier that cannot be sent to a bulk endpoint.
    InvalidId(String),
    Decode(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Http(e) => write!(f, "HTTP error: {e}"),
            AppError::Status { status, body } if body.is_empty() => {
                write!(f, "API returned status {status}")
            }
            AppError::Status { status, body } => {
                write!(f, "API returned status {status}: {body}")
            }
            AppError::Bulk(msg) => write!(f, "{msg}"),
            AppError::InvalidId(id) => write!(f, "Invalid identifier for bulk delete: {id:?}"),
            AppError::Decode(e) => write!(f, "Decode error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidId(_) => HttpResponse::BadRequest().body(self.to_string()),
            _ => {
                log::error!("{self}");
                HttpResponse::BadGateway().body("Upstream Error")
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Http(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e)
    }
}

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use reqwest::Error as ReqwestError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] ReqwestError),
    #[error("upstream returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },
    #[error("could not decode coins response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("upstream rejected request: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ResponseError for DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::InvalidPagination(_) => StatusCode::BAD_REQUEST,
            DashboardError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Fetch(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },
    #[error("could not build http client: {0}")]
    Client(#[from] ReqwestError),
}

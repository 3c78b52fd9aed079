use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

/// Wire shape of every failure response: `{error, details}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[derive(Debug)]
pub enum AppError {
    /// Incomplete or malformed submission; rejected before any external call.
    Validation(String),
    /// Missing or unusable environment configuration; fatal at startup.
    Config(String),
    /// Spreadsheet collaborator returned a non-success status.
    Sheets(String),
    /// Mail message could not be assembled (bad content type, etc.).
    Mail(String),
    Jwt(jsonwebtoken::errors::Error),
    Http(reqwest::Error),
    MailAddress(lettre::address::AddressError),
    MailMessage(lettre::error::Error),
    Smtp(lettre::transport::smtp::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "Validation error: {e}"),
            AppError::Config(e) => write!(f, "Configuration error: {e}"),
            AppError::Sheets(e) => write!(f, "Spreadsheet error: {e}"),
            AppError::Mail(e) => write!(f, "Mail error: {e}"),
            AppError::Jwt(e) => write!(f, "Service account token error: {e}"),
            AppError::Http(e) => write!(f, "HTTP request error: {e}"),
            AppError::MailAddress(e) => write!(f, "Mail address error: {e}"),
            AppError::MailMessage(e) => write!(f, "Mail message error: {e}"),
            AppError::Smtp(e) => write!(f, "SMTP error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(details) => HttpResponse::BadRequest().json(ErrorBody {
                error: "Invalid RSVP submission".to_string(),
                details: details.clone(),
            }),
            _ => {
                log::error!("Error submitting RSVP: {self}");
                HttpResponse::InternalServerError().json(ErrorBody {
                    error: "Error submitting RSVP".to_string(),
                    details: self.to_string(),
                })
            }
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        AppError::Jwt(e)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Http(e)
    }
}

impl From<lettre::address::AddressError> for AppError {
    fn from(e: lettre::address::AddressError) -> Self {
        AppError::MailAddress(e)
    }
}

impl From<lettre::error::Error> for AppError {
    fn from(e: lettre::error::Error) -> Self {
        AppError::MailMessage(e)
    }
}

impl From<lettre::transport::smtp::Error> for AppError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        AppError::Smtp(e)
    }
}

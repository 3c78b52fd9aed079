use std::env;

use crate::errors::AppError;

/// Origins allowed to call the API with credentials when ALLOWED_ORIGINS
/// is not set: the deployed frontend plus local development.
const DEFAULT_ORIGINS: &str = "https://avani-baby-shower-rsvp.vercel.app,http://localhost:3000";

/// Environment-provided configuration, loaded once at startup.
///
/// Every collaborator timeout is explicit here rather than inherited
/// from library defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub smtp_host: String,
    /// SMTP login; doubles as the sender and the operator mailbox that
    /// receives the administrative digest.
    pub smtp_username: String,
    pub smtp_password: String,
    pub spreadsheet_id: String,
    /// Path to the service account JSON key file.
    pub service_account_path: String,
    pub append_range: String,
    /// Worksheet name used for the PDF export.
    pub export_sheet: String,
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Read settings from the environment. A missing required variable
    /// is a configuration error and should abort startup.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            port: parse_var("PORT", "5000")?,
            allowed_origins: optional("ALLOWED_ORIGINS", DEFAULT_ORIGINS)
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            smtp_host: optional("SMTP_HOST", "smtp.gmail.com"),
            smtp_username: required("GMAIL_USER")?,
            smtp_password: required("GMAIL_PASS")?,
            spreadsheet_id: required("SPREADSHEET_ID")?,
            service_account_path: required("GOOGLE_SERVICE_ACCOUNT")?,
            append_range: optional("APPEND_RANGE", "Sheet1!A:F"),
            export_sheet: optional("EXPORT_SHEET", "RSVP"),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30")?,
        })
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("{key} must be set")))
}

fn optional(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        log::info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    optional(key, default)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid {key}: {e}")))
}

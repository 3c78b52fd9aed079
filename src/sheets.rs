//! Spreadsheet collaborator: service-account authentication plus the
//! two operations the submission pipeline needs, row append and PDF
//! export. The wire formats belong to the remote service; nothing here
//! is persisted locally.

use std::fs;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::models::SheetRow;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Narrow contract of the spreadsheet service as seen by the
/// orchestrator. Fakes implement this in tests.
#[async_trait]
pub trait SheetService: Send + Sync {
    /// Append exactly one row to the configured worksheet range.
    async fn append_row(&self, row: SheetRow) -> Result<(), AppError>;
    /// Fetch a PDF rendering of the configured worksheet.
    async fn export_pdf(&self) -> Result<Vec<u8>, AppError>;
}

/// Subset of the service account JSON key file this service uses.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &str) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read service account key {path}: {e}"))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("malformed service account key {path}: {e}"))
        })
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct GoogleSheets {
    http: reqwest::Client,
    key: ServiceAccountKey,
    spreadsheet_id: String,
    append_range: String,
    export_sheet: String,
}

impl GoogleSheets {
    pub fn new(
        http: reqwest::Client,
        key: ServiceAccountKey,
        spreadsheet_id: String,
        append_range: String,
        export_sheet: String,
    ) -> Self {
        Self {
            http,
            key,
            spreadsheet_id,
            append_range,
            export_sheet,
        }
    }

    /// Exchange a signed RS256 assertion for a bearer token. Called per
    /// operation; each submission re-authenticates, no token cache.
    async fn access_token(&self) -> Result<String, AppError> {
        let iat = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        };
        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Sheets(format!(
                "token exchange failed: {status}: {body}"
            )));
        }
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl SheetService for GoogleSheets {
    async fn append_row(&self, row: SheetRow) -> Result<(), AppError> {
        let token = self.access_token().await?;
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}:append",
            self.spreadsheet_id, self.append_range
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            // USER_ENTERED: the store interprets cells like typed input.
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "values": [row.into_values()] }))
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Sheets(format!("append failed: {status}: {body}")));
        }
        log::debug!("appended one row to {}", self.append_range);
        Ok(())
    }

    async fn export_pdf(&self) -> Result<Vec<u8>, AppError> {
        let token = self.access_token().await?;
        let url = format!(
            "https://docs.google.com/spreadsheets/d/{}/export",
            self.spreadsheet_id
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&[("format", "pdf"), ("sheet", self.export_sheet.as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Sheets(format!("export failed: {status}: {body}")));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

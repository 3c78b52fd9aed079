//! Shared test doubles for the submission pipeline.
//!
//! Both fakes record into one chronological call log so tests can
//! assert ordering across the spreadsheet and mail collaborators, not
//! just per-service counts.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use rsvp_backend::AppContext;
use rsvp_backend::errors::AppError;
use rsvp_backend::mailer::{MailTransport, OutgoingEmail};
use rsvp_backend::models::SheetRow;
use rsvp_backend::sheets::SheetService;

pub const OPERATOR_EMAIL: &str = "operator@example.com";
pub const PDF_BYTES: &[u8] = b"%PDF-1.4 fake export";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Append(Vec<Value>),
    Export,
    Send(OutgoingEmail),
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub struct FakeSheets {
    log: CallLog,
    fail_append: bool,
    fail_export: bool,
}

#[async_trait]
impl SheetService for FakeSheets {
    async fn append_row(&self, row: SheetRow) -> Result<(), AppError> {
        if self.fail_append {
            return Err(AppError::Sheets("append failed: 503".to_string()));
        }
        self.log.lock().unwrap().push(Call::Append(row.into_values()));
        Ok(())
    }

    async fn export_pdf(&self) -> Result<Vec<u8>, AppError> {
        if self.fail_export {
            return Err(AppError::Sheets("export failed: 503".to_string()));
        }
        self.log.lock().unwrap().push(Call::Export);
        Ok(PDF_BYTES.to_vec())
    }
}

pub struct FakeMailer {
    log: CallLog,
    fail: bool,
}

#[async_trait]
impl MailTransport for FakeMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Mail("smtp unavailable".to_string()));
        }
        self.log.lock().unwrap().push(Call::Send(email));
        Ok(())
    }
}

/// Which collaborator call should fail, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failure {
    None,
    Append,
    Export,
    Mail,
}

/// Build an [`AppContext`] wired to fakes plus the shared call log.
pub fn test_context(failure: Failure) -> (CallLog, AppContext) {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let ctx = AppContext {
        sheets: Arc::new(FakeSheets {
            log: log.clone(),
            fail_append: failure == Failure::Append,
            fail_export: failure == Failure::Export,
        }),
        mailer: Arc::new(FakeMailer {
            log: log.clone(),
            fail: failure == Failure::Mail,
        }),
        admin_email: OPERATOR_EMAIL.to_string(),
    };
    (log, ctx)
}

pub fn calls(log: &CallLog) -> Vec<Call> {
    log.lock().unwrap().clone()
}

pub fn sent_emails(log: &CallLog) -> Vec<OutgoingEmail> {
    calls(log)
        .into_iter()
        .filter_map(|c| match c {
            Call::Send(email) => Some(email),
            _ => None,
        })
        .collect()
}

pub fn appended_rows(log: &CallLog) -> Vec<Vec<Value>> {
    calls(log)
        .into_iter()
        .filter_map(|c| match c {
            Call::Append(row) => Some(row),
            _ => None,
        })
        .collect()
}

use std::sync::Arc;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod notify;
pub mod sheets;

use crate::mailer::MailTransport;
use crate::sheets::SheetService;

/// Collaborator handles built once at startup and injected into every
/// request. The handles are immutable from the caller's point of view,
/// so tests can swap in counting fakes without touching the handlers.
pub struct AppContext {
    pub sheets: Arc<dyn SheetService>,
    pub mailer: Arc<dyn MailTransport>,
    /// Recipient of the administrative digest (also the SMTP sender).
    pub admin_email: String,
}

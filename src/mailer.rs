//! Mail collaborator: a composed message shape plus the SMTP transport
//! that delivers it. Sends are best-effort within one request; there is
//! no queue and no retry.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::errors::AppError;

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq)]
pub enum MailBody {
    Html(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// One composed notification, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: MailBody,
    pub attachment: Option<PdfAttachment>,
}

/// Narrow contract of the mail service as seen by the orchestrator.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Build a TLS relay transport with an explicit timeout. The login
    /// doubles as the sender address.
    pub fn new(
        host: &str,
        username: String,
        password: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(username.clone(), password))
            .timeout(Some(timeout))
            .build();
        Ok(Self {
            transport,
            from: username,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        let OutgoingEmail {
            to,
            subject,
            body,
            attachment,
        } = email;

        let builder = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject);

        let message = match attachment {
            None => match body {
                MailBody::Html(html) => builder.header(ContentType::TEXT_HTML).body(html)?,
                MailBody::Text(text) => builder.header(ContentType::TEXT_PLAIN).body(text)?,
            },
            Some(pdf) => {
                let body_part = match body {
                    MailBody::Html(html) => SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html),
                    MailBody::Text(text) => SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text),
                };
                let content_type = ContentType::parse(PDF_MIME)
                    .map_err(|e| AppError::Mail(format!("invalid attachment type: {e}")))?;
                let pdf_part = Attachment::new(pdf.filename).body(pdf.bytes, content_type);
                builder.multipart(MultiPart::mixed().singlepart(body_part).singlepart(pdf_part))?
            }
        };

        self.transport.send(message).await?;
        log::info!("sent mail to {to}");
        Ok(())
    }
}

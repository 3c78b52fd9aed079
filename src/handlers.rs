//! HTTP handlers and the submission orchestrator.

use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::AppContext;
use crate::errors::AppError;
use crate::models::{Attendance, RsvpSubmission, SheetRow, ValidRsvp};
use crate::notify;

pub const CONFIRMATION: &str = "RSVP submitted successfully!";

/// GET /api/test — liveness probe for the frontend.
pub async fn api_test() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "RSVP API is running" }))
}

/// POST /submit-rsvp
///
/// The caller gets one opaque outcome: 200 with a confirmation string,
/// 400 when the submission fails validation, or 500 when any
/// collaborator call fails. Partial completion is not reported.
pub async fn submit_rsvp(
    ctx: web::Data<AppContext>,
    body: web::Json<RsvpSubmission>,
) -> Result<HttpResponse, AppError> {
    let rsvp = body.into_inner().validate()?;
    process_submission(&rsvp, ctx.get_ref()).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(CONFIRMATION))
}

/// The orchestrated sequence for one validated submission, strictly in
/// order: append the row, send the attendee confirmation (attending
/// branch only), fetch the PDF export, mail it to the operator. The
/// first failure aborts everything that follows; nothing is retried.
pub async fn process_submission(rsvp: &ValidRsvp, ctx: &AppContext) -> Result<(), AppError> {
    ctx.sheets.append_row(SheetRow::from(rsvp)).await?;

    if let Some(confirmation) = notify::attendee_confirmation(rsvp) {
        ctx.mailer.send(confirmation).await?;
    }

    let pdf = ctx.sheets.export_pdf().await?;
    ctx.mailer.send(notify::admin_digest(&ctx.admin_email, pdf)).await?;

    let attending = matches!(rsvp.attendance, Attendance::Attending { .. });
    log::info!("recorded RSVP (attending: {attending})");
    Ok(())
}

//! Notification composition: the attendee confirmation and the
//! operator digest. Composition is pure; delivery lives in [`crate::mailer`].

use crate::mailer::{MailBody, OutgoingEmail, PdfAttachment};
use crate::models::{Attendance, ValidRsvp};

pub const ATTENDEE_SUBJECT: &str = "🎉 You're Invited! Thank You for Your RSVP! 👶";
pub const ADMIN_SUBJECT: &str = "New RSVP Submission - PDF Attached";
pub const ADMIN_BODY: &str = "Here is the latest RSVP data in PDF format.";
pub const EXPORT_FILENAME: &str = "RSVP_Data.pdf";

/// Confirmation for the attending branch; `None` when the guest
/// declined (no confirmation may be sent on that branch).
pub fn attendee_confirmation(rsvp: &ValidRsvp) -> Option<OutgoingEmail> {
    let Attendance::Attending {
        guest_names,
        guest_count,
        email,
    } = &rsvp.attendance
    else {
        return None;
    };

    let html = format!(
        r#"<div style="background-color: #fdf4f5; padding: 20px; border-radius: 10px; font-family: Arial, sans-serif; color: #333; text-align: center; width: 60%; margin: auto;">
  <h2 style="color: #ff4b77; font-size: 24px; margin-bottom: 10px;">Thank You for RSVPing!</h2>
  <p style="font-size: 16px; color: #555; margin-bottom: 20px;">We're thrilled to celebrate with you!</p>
  <div style="background-color: #ffffff; padding: 15px; border-radius: 8px; margin: 10px auto; text-align: left; display: inline-block; width: 90%;">
    <p style="font-size: 14px; color: #333;">Dear <strong>{first_guest}</strong>,</p>
    <p style="font-size: 14px; color: #555;">Here are the details of your RSVP:</p>
    <ul style="list-style-type: none; padding: 0; font-size: 14px; color: #444;">
      <li>👶 <strong>Attending:</strong> Yes</li>
      <li>👥 <strong>Number of Guests:</strong> {guest_count}</li>
      <li>🎉 <strong>Guest Names:</strong> {guest_list}</li>
    </ul>
    <p style="font-size: 14px; color: #555;">We can't wait to see you at the baby shower!</p>
  </div>
  <p style="margin-top: 20px; font-size: 14px; color: #777;">With love,</p>
  <h3 style="color: #ff4b77; font-size: 18px;">Avani &amp; Darshan</h3>
</div>"#,
        first_guest = guest_names[0],
        guest_count = guest_count,
        guest_list = guest_names.join(", "),
    );

    Some(OutgoingEmail {
        to: email.clone(),
        subject: ATTENDEE_SUBJECT.to_string(),
        body: MailBody::Html(html),
        attachment: None,
    })
}

/// Operator digest carrying the current full export of responses.
pub fn admin_digest(operator: &str, pdf: Vec<u8>) -> OutgoingEmail {
    OutgoingEmail {
        to: operator.to_string(),
        subject: ADMIN_SUBJECT.to_string(),
        body: MailBody::Text(ADMIN_BODY.to_string()),
        attachment: Some(PdfAttachment {
            filename: EXPORT_FILENAME.to_string(),
            bytes: pdf,
        }),
    }
}

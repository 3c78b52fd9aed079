//! RSVP submission shapes: the raw wire form, the validated form, and
//! the spreadsheet row projection.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::errors::AppError;

/// Raw request body of `POST /submit-rsvp`.
///
/// Every field is optional at this layer: a missing field must become a
/// validation error, never a deserializer fault. Deep validation is the
/// client UI's job; the server only checks the presence rules below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub is_attending: Option<bool>,
    pub guest_count: Option<u32>,
    pub guest_names: Option<Vec<String>>,
    pub email: Option<String>,
    pub non_attending_name: Option<String>,
    pub wishes: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Attendance {
    Attending {
        /// Non-empty; the first entry is the primary contact.
        guest_names: Vec<String>,
        guest_count: u32,
        /// Confirmation recipient.
        email: String,
    },
    NotAttending {
        name: String,
    },
}

/// A submission that passed the presence checks.
#[derive(Debug, Clone)]
pub struct ValidRsvp {
    pub attendance: Attendance,
    pub wishes: String,
}

impl RsvpSubmission {
    /// Check the branch-dependent presence rules and normalize into a
    /// [`ValidRsvp`]. No side effects; all problems are reported together.
    pub fn validate(self) -> Result<ValidRsvp, AppError> {
        let Some(attending) = self.is_attending else {
            return Err(AppError::Validation("isAttending is required".to_string()));
        };
        let wishes = self.wishes.unwrap_or_default().trim().to_string();

        if attending {
            let mut errors = Vec::new();
            let guest_names: Vec<String> = self
                .guest_names
                .unwrap_or_default()
                .into_iter()
                .map(|n| n.trim().to_string())
                .collect();
            if guest_names.first().is_none_or(|n| n.is_empty()) {
                errors.push("guestNames must include the primary guest when attending");
            }
            let guest_count = self.guest_count.unwrap_or(0);
            if guest_count == 0 {
                errors.push("guestCount must be a positive integer when attending");
            }
            let email = self.email.unwrap_or_default().trim().to_string();
            if email.is_empty() {
                errors.push("email is required when attending");
            }
            if !errors.is_empty() {
                return Err(AppError::Validation(errors.join("; ")));
            }
            Ok(ValidRsvp {
                attendance: Attendance::Attending {
                    guest_names,
                    guest_count,
                    email,
                },
                wishes,
            })
        } else {
            let name = self.non_attending_name.unwrap_or_default().trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation(
                    "nonAttendingName is required when not attending".to_string(),
                ));
            }
            Ok(ValidRsvp {
                attendance: Attendance::NotAttending { name },
                wishes,
            })
        }
    }
}

/// Fixed 6-column projection appended to the worksheet. The remote
/// store owns persistence; this row has no identity beyond append order.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub full_name: String,
    /// Empty cell when the submitter declined and left no address.
    pub email: Option<String>,
    /// Forced to 0 when not attending, whatever the input said.
    pub guest_count: u32,
    pub guest_names: String,
    pub wishes: String,
    pub attending: bool,
}

impl From<&ValidRsvp> for SheetRow {
    fn from(rsvp: &ValidRsvp) -> Self {
        match &rsvp.attendance {
            Attendance::Attending {
                guest_names,
                guest_count,
                email,
            } => SheetRow {
                full_name: guest_names[0].clone(),
                email: Some(email.clone()),
                guest_count: *guest_count,
                guest_names: guest_names.join(", "),
                wishes: rsvp.wishes.clone(),
                attending: true,
            },
            Attendance::NotAttending { name } => SheetRow {
                full_name: name.clone(),
                email: None,
                guest_count: 0,
                guest_names: String::new(),
                wishes: rsvp.wishes.clone(),
                attending: false,
            },
        }
    }
}

impl SheetRow {
    /// Cell values in column order, ready for the append call.
    pub fn into_values(self) -> Vec<Value> {
        vec![
            json!(self.full_name),
            self.email.map_or(Value::Null, |e| json!(e)),
            json!(self.guest_count),
            json!(self.guest_names),
            json!(self.wishes),
            json!(if self.attending { "Yes" } else { "No" }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attending_submission() -> RsvpSubmission {
        RsvpSubmission {
            is_attending: Some(true),
            guest_count: Some(2),
            guest_names: Some(vec!["Jane Doe".to_string(), "Joe Doe".to_string()]),
            email: Some("jane@example.com".to_string()),
            wishes: Some("Congrats!".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn attending_row_projection() {
        let rsvp = attending_submission().validate().expect("valid submission");
        let row = SheetRow::from(&rsvp);
        assert_eq!(
            row.into_values(),
            vec![
                json!("Jane Doe"),
                json!("jane@example.com"),
                json!(2),
                json!("Jane Doe, Joe Doe"),
                json!("Congrats!"),
                json!("Yes"),
            ]
        );
    }

    #[test]
    fn non_attending_row_has_null_email_and_zero_count() {
        let rsvp = RsvpSubmission {
            is_attending: Some(false),
            non_attending_name: Some("John Smith".to_string()),
            // Ignored on the non-attending branch.
            guest_count: Some(4),
            wishes: Some("Sorry to miss it".to_string()),
            ..Default::default()
        }
        .validate()
        .expect("valid submission");

        let row = SheetRow::from(&rsvp);
        assert_eq!(
            row.into_values(),
            vec![
                json!("John Smith"),
                Value::Null,
                json!(0),
                json!(""),
                json!("Sorry to miss it"),
                json!("No"),
            ]
        );
    }

    #[test]
    fn missing_is_attending_is_rejected() {
        let err = RsvpSubmission::default().validate().unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("isAttending")),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn attending_presence_errors_are_collected() {
        let err = RsvpSubmission {
            is_attending: Some(true),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("guestNames"));
                assert!(msg.contains("guestCount"));
                assert!(msg.contains("email"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn non_attending_requires_a_name() {
        let err = RsvpSubmission {
            is_attending: Some(false),
            non_attending_name: Some("   ".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        match err {
            AppError::Validation(msg) => assert!(msg.contains("nonAttendingName")),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn camel_case_wire_names_deserialize() {
        let raw = serde_json::json!({
            "isAttending": true,
            "guestCount": 1,
            "guestNames": ["Jane Doe"],
            "email": "jane@example.com"
        });
        let submission: RsvpSubmission =
            serde_json::from_value(raw).expect("deserialize submission");
        assert_eq!(submission.is_attending, Some(true));
        assert_eq!(submission.guest_count, Some(1));
        assert!(submission.wishes.is_none());
    }
}

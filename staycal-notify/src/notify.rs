//! Turning visit inserts into notification emails.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;

use staycal_core::{Visit, VisitStatus};

use crate::config::NotifyConfig;

const RESEND_URL: &str = "https://api.resend.com/emails";

/// The row-change payload the database webhook delivers.
#[derive(Debug, Deserialize)]
pub struct ChangePayload {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub table: String,
    pub record: Visit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Only brand-new pending proposals produce mail.
pub fn should_notify(payload: &ChangePayload) -> bool {
    payload.kind == ChangeKind::Insert
        && payload.table == "visits"
        && payload.record.status == VisitStatus::Pending
}

#[derive(Debug)]
pub struct Email {
    pub subject: String,
    pub html: String,
}

pub fn compose(visit: &Visit) -> Email {
    let start = long_date(visit.start_date);
    let end = long_date(visit.end_date);

    let arrival = visit
        .arrival_time
        .map(|t| format!(" (arriving {})", t.format("%H:%M")))
        .unwrap_or_default();
    let departure = visit
        .departure_time
        .map(|t| format!(" (departing {})", t.format("%H:%M")))
        .unwrap_or_default();
    let notes = visit
        .notes
        .as_deref()
        .map(|n| format!("<p><strong>Notes:</strong> {n}</p>"))
        .unwrap_or_default();

    let html = format!(
        "<h2>New Visit Proposal</h2>\
        <p>A new visit has been proposed for the property:</p>\
        <ul>\
        <li><strong>Start:</strong> {start}{arrival}</li>\
        <li><strong>End:</strong> {end}{departure}</li>\
        </ul>\
        {notes}\
        <p>Log in to the calendar to review and approve or deny this request.</p>"
    );

    Email {
        subject: format!("New Visit Proposal: {start} - {end}"),
        html,
    }
}

pub async fn send(
    http: &reqwest::Client,
    api_key: &str,
    config: &NotifyConfig,
    email: &Email,
) -> Result<()> {
    let response = http
        .post(RESEND_URL)
        .bearer_auth(api_key)
        .json(&serde_json::json!({
            "from": config.from,
            "to": config.recipients,
            "subject": email.subject,
            "html": email.html,
        }))
        .send()
        .await
        .context("Failed to reach the email API")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Email API error ({status}): {body}");
    }

    Ok(())
}

/// e.g. "Monday, August 10, 2026"
fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn visit(status: VisitStatus) -> Visit {
        Visit {
            id: "v1".to_string(),
            visitor_id: "visitor-1".to_string(),
            submitted_by: "user-1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
            arrival_time: None,
            departure_time: None,
            notes: None,
            status,
            created_at: Utc::now(),
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    fn payload(kind: ChangeKind, table: &str, status: VisitStatus) -> ChangePayload {
        ChangePayload {
            kind,
            table: table.to_string(),
            record: visit(status),
        }
    }

    #[test]
    fn test_only_new_pending_visits_notify() {
        assert!(should_notify(&payload(
            ChangeKind::Insert,
            "visits",
            VisitStatus::Pending
        )));
        assert!(!should_notify(&payload(
            ChangeKind::Update,
            "visits",
            VisitStatus::Pending
        )));
        assert!(!should_notify(&payload(
            ChangeKind::Insert,
            "visits",
            VisitStatus::Confirmed
        )));
        assert!(!should_notify(&payload(
            ChangeKind::Insert,
            "profiles",
            VisitStatus::Pending
        )));
    }

    #[test]
    fn test_compose_subject_carries_both_dates() {
        let email = compose(&visit(VisitStatus::Pending));
        assert_eq!(
            email.subject,
            "New Visit Proposal: Monday, August 10, 2026 - Friday, August 14, 2026"
        );
    }

    #[test]
    fn test_compose_includes_times_and_notes_when_present() {
        let mut v = visit(VisitStatus::Pending);
        v.arrival_time = NaiveTime::from_hms_opt(15, 30, 0);
        v.notes = Some("Bringing the dog".to_string());

        let email = compose(&v);
        assert!(email.html.contains("(arriving 15:30)"));
        assert!(email.html.contains("Bringing the dog"));

        let bare = compose(&visit(VisitStatus::Pending));
        assert!(!bare.html.contains("arriving"));
        assert!(!bare.html.contains("Notes"));
    }

    #[test]
    fn test_payload_deserializes_webhook_shape() {
        let json = serde_json::json!({
            "type": "INSERT",
            "table": "visits",
            "record": {
                "id": "2f5b",
                "visitor_id": "ab12",
                "submitted_by": "cd34",
                "start_date": "2026-08-10",
                "end_date": "2026-08-14",
                "status": "pending",
                "created_at": "2026-08-01T12:00:00Z"
            }
        });

        let payload: ChangePayload = serde_json::from_value(json).unwrap();
        assert_eq!(payload.kind, ChangeKind::Insert);
        assert!(should_notify(&payload));
    }
}

//! Visit proposals and the review state machine.
//!
//! A visit is a date-ranged stay at the property. It is created pending,
//! and an admin decision moves it to confirmed or denied exactly once.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_span::DateSpan;
use crate::error::{StaycalError, StaycalResult};

/// A visit row as the reservation service stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub id: String,
    pub visitor_id: String,
    pub submitted_by: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub arrival_time: Option<NaiveTime>,
    #[serde(default)]
    pub departure_time: Option<NaiveTime>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: VisitStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
}

impl Visit {
    /// The inclusive day interval this visit occupies.
    pub fn span(&self) -> StaycalResult<DateSpan> {
        DateSpan::new(self.start_date, self.end_date)
    }

    /// Whether this visit occupies `day`. Endpoints count regardless of
    /// arrival/departure times.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Whether `user_id` may cancel (delete) this visit. Submitters can
    /// only withdraw proposals that are still pending; admins can delete
    /// anything.
    pub fn can_cancel(&self, user_id: &str, is_admin: bool) -> bool {
        is_admin || (self.submitted_by == user_id && self.status == VisitStatus::Pending)
    }
}

/// Lifecycle state of a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    Pending,
    Confirmed,
    Denied,
}

impl VisitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VisitStatus::Pending => "pending",
            VisitStatus::Confirmed => "confirmed",
            VisitStatus::Denied => "denied",
        }
    }

    /// Apply an admin decision. Only pending visits can be reviewed, and
    /// a decision is never revisited.
    pub fn review(self, decision: Decision) -> StaycalResult<VisitStatus> {
        match self {
            VisitStatus::Pending => Ok(decision.target()),
            reviewed => Err(StaycalError::AlreadyReviewed(reviewed.as_str().to_string())),
        }
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admin's verdict on a pending visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
}

impl Decision {
    pub fn target(self) -> VisitStatus {
        match self {
            Decision::Approve => VisitStatus::Confirmed,
            Decision::Deny => VisitStatus::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_visit(status: VisitStatus) -> Visit {
        Visit {
            id: "v1".to_string(),
            visitor_id: "visitor-1".to_string(),
            submitted_by: "user-1".to_string(),
            start_date: day(2026, 8, 10),
            end_date: day(2026, 8, 14),
            arrival_time: None,
            departure_time: None,
            notes: None,
            status,
            created_at: Utc::now(),
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    #[test]
    fn test_pending_can_be_confirmed_or_denied() {
        assert_eq!(
            VisitStatus::Pending.review(Decision::Approve).unwrap(),
            VisitStatus::Confirmed
        );
        assert_eq!(
            VisitStatus::Pending.review(Decision::Deny).unwrap(),
            VisitStatus::Denied
        );
    }

    #[test]
    fn test_decisions_are_final() {
        assert!(VisitStatus::Confirmed.review(Decision::Deny).is_err());
        assert!(VisitStatus::Confirmed.review(Decision::Approve).is_err());
        assert!(VisitStatus::Denied.review(Decision::Approve).is_err());
    }

    #[test]
    fn test_covers_every_day_inclusive() {
        let visit = sample_visit(VisitStatus::Confirmed);
        assert!(visit.covers(day(2026, 8, 10)));
        assert!(visit.covers(day(2026, 8, 14)));
        assert!(!visit.covers(day(2026, 8, 9)));
        assert!(!visit.covers(day(2026, 8, 15)));
        assert_eq!(visit.span().unwrap().num_days(), 5);
    }

    #[test]
    fn test_submitter_can_only_cancel_pending() {
        let pending = sample_visit(VisitStatus::Pending);
        let confirmed = sample_visit(VisitStatus::Confirmed);
        assert!(pending.can_cancel("user-1", false));
        assert!(!pending.can_cancel("user-2", false));
        assert!(!confirmed.can_cancel("user-1", false));
        assert!(confirmed.can_cancel("user-2", true));
    }

    #[test]
    fn test_deserializes_service_row() {
        let row = serde_json::json!({
            "id": "2f5b",
            "visitor_id": "ab12",
            "submitted_by": "cd34",
            "start_date": "2026-08-10",
            "end_date": "2026-08-14",
            "arrival_time": "15:30:00",
            "departure_time": null,
            "notes": "Bringing the dog",
            "status": "pending",
            "created_at": "2026-08-01T12:00:00Z",
            "reviewed_at": null,
            "reviewed_by": null
        });
        let visit: Visit = serde_json::from_value(row).unwrap();
        assert_eq!(visit.status, VisitStatus::Pending);
        assert_eq!(
            visit.arrival_time,
            Some(NaiveTime::from_hms_opt(15, 30, 0).unwrap())
        );
        assert_eq!(visit.departure_time, None);
    }

    #[test]
    fn test_unknown_status_fails_deserialization() {
        let result: Result<VisitStatus, _> = serde_json::from_str("\"approved\"");
        assert!(result.is_err());
    }
}

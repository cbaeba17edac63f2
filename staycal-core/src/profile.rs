//! User profiles and owner presence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A user profile row. Admins review proposals and carry an owner
/// presence status shown alongside the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub owner_status: Option<OwnerStatus>,
    #[serde(default)]
    pub owner_status_until: Option<NaiveDate>,
}

/// Whether an owner is at the property's town or away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerStatus {
    InTownIndefinitely,
    OutOfStateIndefinitely,
}

impl Profile {
    /// Name shown on proposals and in the legend. Falls back to the part
    /// of the email before the `@`.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }

    /// An in-town status with an `until` date strictly before today has
    /// lapsed and should be written back as out-of-state.
    pub fn status_lapsed(&self, today: NaiveDate) -> bool {
        self.owner_status == Some(OwnerStatus::InTownIndefinitely)
            && matches!(self.owner_status_until, Some(until) if until < today)
    }

    /// The status to display, with lapsed in-town statuses reading as
    /// out-of-state.
    pub fn owner_presence(&self, today: NaiveDate) -> OwnerStatus {
        if self.status_lapsed(today) {
            return OwnerStatus::OutOfStateIndefinitely;
        }
        self.owner_status
            .unwrap_or(OwnerStatus::OutOfStateIndefinitely)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile(status: Option<OwnerStatus>, until: Option<NaiveDate>) -> Profile {
        Profile {
            id: "p1".to_string(),
            email: "jess@example.com".to_string(),
            name: None,
            is_admin: true,
            owner_status: status,
            owner_status_until: until,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_email_prefix() {
        let mut p = profile(None, None);
        assert_eq!(p.display_name(), "jess");
        p.name = Some("Jess".to_string());
        assert_eq!(p.display_name(), "Jess");
    }

    #[test]
    fn test_in_town_until_lapses_day_after() {
        let today = day(2026, 8, 23);
        let p = profile(
            Some(OwnerStatus::InTownIndefinitely),
            Some(day(2026, 8, 22)),
        );
        assert!(p.status_lapsed(today));
        assert_eq!(
            p.owner_presence(today),
            OwnerStatus::OutOfStateIndefinitely
        );

        // Not lapsed on the until day itself
        let p = profile(
            Some(OwnerStatus::InTownIndefinitely),
            Some(day(2026, 8, 23)),
        );
        assert!(!p.status_lapsed(today));
        assert_eq!(p.owner_presence(today), OwnerStatus::InTownIndefinitely);
    }

    #[test]
    fn test_missing_status_reads_as_away() {
        let p = profile(None, None);
        assert_eq!(
            p.owner_presence(day(2026, 8, 23)),
            OwnerStatus::OutOfStateIndefinitely
        );
    }

    #[test]
    fn test_owner_status_wire_format() {
        let s: OwnerStatus = serde_json::from_str("\"in_town_indefinitely\"").unwrap();
        assert_eq!(s, OwnerStatus::InTownIndefinitely);
        assert_eq!(
            serde_json::to_string(&OwnerStatus::OutOfStateIndefinitely).unwrap(),
            "\"out_of_state_indefinitely\""
        );
    }
}

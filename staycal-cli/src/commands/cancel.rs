use anyhow::Result;
use dialoguer::Confirm;

use staycal_core::{StaycalError, Visit};

use crate::render::visit_dates_line;

/// How the deletion should be issued once the caller is allowed to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Removal {
    /// Unscoped delete: admins may remove any visit, any status.
    Admin,
    /// Pending-scoped delete of the caller's own proposal.
    Withdraw,
}

fn removal(visit: &Visit, user_id: &str, is_admin: bool) -> Option<Removal> {
    if is_admin {
        Some(Removal::Admin)
    } else if visit.can_cancel(user_id, false) {
        Some(Removal::Withdraw)
    } else {
        None
    }
}

pub async fn run(id: &str, yes: bool) -> Result<()> {
    let (remote, session) = super::signed_in_remote().await?;

    let is_admin = remote
        .fetch_profile(session.user_id())
        .await?
        .is_some_and(|p| p.is_admin);

    let visit = remote
        .fetch_visit(id)
        .await?
        .ok_or_else(|| StaycalError::VisitNotFound(id.to_string()))?;

    let removal = match removal(&visit, session.user_id(), is_admin) {
        Some(removal) => removal,
        None => anyhow::bail!("Only pending proposals you submitted can be cancelled"),
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Cancel the visit {}?", visit_dates_line(&visit)))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Left unchanged.");
            return Ok(());
        }
    }

    match removal {
        Removal::Admin => remote.delete_visit(id).await?,
        Removal::Withdraw => remote.cancel_visit(id, session.user_id()).await?,
    }

    println!("Cancelled {}.", visit_dates_line(&visit));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use staycal_core::VisitStatus;

    fn visit(submitted_by: &str, status: VisitStatus) -> Visit {
        Visit {
            id: "v1".to_string(),
            visitor_id: "visitor-1".to_string(),
            submitted_by: submitted_by.to_string(),
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

    #[test]
    fn test_admin_cancelling_own_reviewed_visit_deletes_unscoped() {
        // The pending-scoped delete would match zero rows for a confirmed
        // visit, so the admin path must not depend on who submitted it.
        let own = visit("admin-1", VisitStatus::Confirmed);
        assert_eq!(removal(&own, "admin-1", true), Some(Removal::Admin));

        let other = visit("user-1", VisitStatus::Denied);
        assert_eq!(removal(&other, "admin-1", true), Some(Removal::Admin));
    }

    #[test]
    fn test_submitter_withdraws_own_pending_visit() {
        let pending = visit("user-1", VisitStatus::Pending);
        assert_eq!(removal(&pending, "user-1", false), Some(Removal::Withdraw));
    }

    #[test]
    fn test_non_admin_cannot_remove_reviewed_or_foreign_visits() {
        let confirmed = visit("user-1", VisitStatus::Confirmed);
        assert_eq!(removal(&confirmed, "user-1", false), None);

        let foreign = visit("user-2", VisitStatus::Pending);
        assert_eq!(removal(&foreign, "user-1", false), None);
    }
}

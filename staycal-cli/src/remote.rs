//! HTTP client for the hosted reservation service.
//!
//! Two endpoint families: `/auth/v1/*` for the token lifecycle and
//! `/rest/v1/*` for row access in PostgREST conventions (`select=`,
//! `column=eq.value`, `order=column.asc`). Every request carries the
//! public `apikey`; row access is authorized by the caller's bearer token
//! and the service's row-level rules, with the anon key standing in for
//! signed-out reads.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use staycal_core::config::ServiceConfig;
use staycal_core::{Decision, Profile, StaycalError, Visit, VisitStatus, Visitor};

pub struct Remote {
    http: Client,
    base: Url,
    anon_key: String,
    bearer: Option<String>,
}

impl Remote {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let base = Url::parse(&config.url)
            .with_context(|| format!("Invalid service URL: {}", config.url))?;

        Ok(Remote {
            http: Client::new(),
            base,
            anon_key: config.anon_key.clone(),
            bearer: None,
        })
    }

    /// Attach a signed-in user's access token to subsequent requests.
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {path}"))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let token = self.bearer.as_deref().unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    // ------------------------------------------------------------------
    // Auth endpoints
    // ------------------------------------------------------------------

    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<()> {
        let url = self.endpoint("/auth/v1/signup")?;
        let response = self
            .request(Method::POST, url)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "name": name },
            }))
            .send()
            .await
            .context("Failed to reach the reservation service")?;

        check_status(response).await?;
        Ok(())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let url = self.endpoint("/auth/v1/token")?;
        let response = self
            .request(Method::POST, url)
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Failed to reach the reservation service")?;

        read_json(response).await
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> Result<TokenResponse> {
        let url = self.endpoint("/auth/v1/token")?;
        let response = self
            .request(Method::POST, url)
            .query(&[("grant_type", "refresh_token")])
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .context("Failed to reach the reservation service")?;

        read_json(response).await
    }

    pub async fn sign_out(&self) -> Result<()> {
        let url = self.endpoint("/auth/v1/logout")?;
        let response = self
            .request(Method::POST, url)
            .send()
            .await
            .context("Failed to reach the reservation service")?;

        check_status(response).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Row access
    // ------------------------------------------------------------------

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = self.endpoint(&format!("/rest/v1/{table}"))?;
        let response = self
            .request(Method::GET, url)
            .query(query)
            .send()
            .await
            .context("Failed to reach the reservation service")?;

        read_json(response).await
    }

    async fn insert<T: DeserializeOwned, B: Serialize>(&self, table: &str, body: &B) -> Result<T> {
        let url = self.endpoint(&format!("/rest/v1/{table}"))?;
        let response = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .context("Failed to reach the reservation service")?;

        let mut rows: Vec<T> = read_json(response).await?;
        match rows.pop() {
            Some(row) => Ok(row),
            None => bail!("Service accepted the insert but returned no row"),
        }
    }

    async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Vec<T>> {
        let url = self.endpoint(&format!("/rest/v1/{table}"))?;
        let response = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .query(query)
            .json(body)
            .send()
            .await
            .context("Failed to reach the reservation service")?;

        read_json(response).await
    }

    async fn delete(&self, table: &str, query: &[(&str, &str)]) -> Result<()> {
        let url = self.endpoint(&format!("/rest/v1/{table}"))?;
        let response = self
            .request(Method::DELETE, url)
            .query(query)
            .send()
            .await
            .context("Failed to reach the reservation service")?;

        check_status(response).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Visitors
    // ------------------------------------------------------------------

    pub async fn list_visitors(&self) -> Result<Vec<Visitor>> {
        self.select("visitors", &[("select", "*"), ("order", "name.asc")])
            .await
    }

    pub async fn find_visitor(&self, user_id: &str) -> Result<Option<Visitor>> {
        let filter = format!("eq.{user_id}");
        let rows: Vec<Visitor> = self
            .select("visitors", &[("select", "*"), ("user_id", &filter)])
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Find the caller's visitor row, creating one on first proposal.
    pub async fn ensure_visitor(&self, user_id: &str, name: &str) -> Result<Visitor> {
        if let Some(existing) = self.find_visitor(user_id).await? {
            return Ok(existing);
        }

        self.insert(
            "visitors",
            &NewVisitor {
                user_id: user_id.to_string(),
                name: name.to_string(),
                description: "Registered user".to_string(),
            },
        )
        .await
    }

    // ------------------------------------------------------------------
    // Visits
    // ------------------------------------------------------------------

    pub async fn list_visits(&self) -> Result<Vec<Visit>> {
        self.select("visits", &[("select", "*"), ("order", "start_date.asc")])
            .await
    }

    pub async fn my_visits(&self, user_id: &str) -> Result<Vec<Visit>> {
        let filter = format!("eq.{user_id}");
        self.select(
            "visits",
            &[
                ("select", "*"),
                ("submitted_by", &filter),
                ("order", "start_date.asc"),
            ],
        )
        .await
    }

    pub async fn pending_visits(&self) -> Result<Vec<Visit>> {
        self.select(
            "visits",
            &[
                ("select", "*"),
                ("status", "eq.pending"),
                ("order", "created_at.asc"),
            ],
        )
        .await
    }

    pub async fn fetch_visit(&self, id: &str) -> Result<Option<Visit>> {
        let filter = format!("eq.{id}");
        let rows: Vec<Visit> = self
            .select("visits", &[("select", "*"), ("id", &filter)])
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn create_visit(&self, new_visit: &NewVisit) -> Result<Visit> {
        self.insert("visits", new_visit).await
    }

    /// Apply an admin decision to a pending visit. The update is scoped
    /// to `status=eq.pending` so a decision made elsewhere in the
    /// meantime cannot be overwritten.
    pub async fn review_visit(
        &self,
        id: &str,
        decision: Decision,
        reviewer_id: &str,
    ) -> Result<Visit> {
        let id_filter = format!("eq.{id}");
        let rows: Vec<Visit> = self
            .update(
                "visits",
                &[("id", &id_filter), ("status", "eq.pending")],
                &ReviewPatch {
                    status: decision.target(),
                    reviewed_at: Utc::now(),
                    reviewed_by: reviewer_id.to_string(),
                },
            )
            .await?;

        match rows.into_iter().next() {
            Some(visit) => Ok(visit),
            None => match self.fetch_visit(id).await? {
                Some(visit) => {
                    Err(StaycalError::AlreadyReviewed(visit.status.to_string()).into())
                }
                None => Err(StaycalError::VisitNotFound(id.to_string()).into()),
            },
        }
    }

    /// Submitter withdrawal: only removes the row while it is still the
    /// caller's pending proposal.
    pub async fn cancel_visit(&self, id: &str, user_id: &str) -> Result<()> {
        let id_filter = format!("eq.{id}");
        let user_filter = format!("eq.{user_id}");
        self.delete(
            "visits",
            &[
                ("id", &id_filter),
                ("submitted_by", &user_filter),
                ("status", "eq.pending"),
            ],
        )
        .await
    }

    /// Admin deletion, regardless of status or submitter.
    pub async fn delete_visit(&self, id: &str) -> Result<()> {
        let filter = format!("eq.{id}");
        self.delete("visits", &[("id", &filter)]).await
    }

    // ------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------

    pub async fn fetch_profile(&self, id: &str) -> Result<Option<Profile>> {
        let filter = format!("eq.{id}");
        let rows: Vec<Profile> = self
            .select("profiles", &[("select", "*"), ("id", &filter)])
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn admin_profiles(&self) -> Result<Vec<Profile>> {
        self.select(
            "profiles",
            &[
                ("select", "*"),
                ("is_admin", "eq.true"),
                ("order", "email.asc"),
            ],
        )
        .await
    }

    pub async fn update_profile(
        &self,
        id: &str,
        updates: &serde_json::Value,
    ) -> Result<Option<Profile>> {
        let filter = format!("eq.{id}");
        let rows: Vec<Profile> = self
            .update("profiles", &[("id", &filter)], updates)
            .await?;
        Ok(rows.into_iter().next())
    }
}

// ----------------------------------------------------------------------
// Wire types
// ----------------------------------------------------------------------

/// Tokens issued by the auth API on sign-in and refresh.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: AuthUser,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewVisitor {
    pub user_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct NewVisit {
    pub visitor_id: String,
    pub submitted_by: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: VisitStatus,
}

#[derive(Debug, Serialize)]
struct ReviewPatch {
    status: VisitStatus,
    reviewed_at: DateTime<Utc>,
    reviewed_by: String,
}

// ----------------------------------------------------------------------
// Response handling
// ----------------------------------------------------------------------

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(StaycalError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    }
    .into())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .context("Failed to parse service response")
}

/// Pull a human-readable message out of an error body. The auth and rest
/// endpoints use different shapes.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "message", "msg", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    if body.is_empty() {
        "no error details returned".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_auth_shape() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(error_message(body), "Invalid login credentials");
    }

    #[test]
    fn test_error_message_rest_shape() {
        let body = r#"{"code":"42501","message":"permission denied for table visits"}"#;
        assert_eq!(error_message(body), "permission denied for table visits");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
        assert_eq!(error_message(""), "no error details returned");
    }

    #[test]
    fn test_new_visit_omits_unset_times() {
        let new_visit = NewVisit {
            visitor_id: "v1".to_string(),
            submitted_by: "u1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
            arrival_time: None,
            departure_time: None,
            notes: None,
            status: VisitStatus::Pending,
        };

        let json = serde_json::to_value(&new_visit).unwrap();
        assert!(json.get("arrival_time").is_none());
        assert!(json.get("notes").is_none());
        assert_eq!(json["status"], "pending");
    }
}

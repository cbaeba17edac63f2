//! Visitor records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person who stays at the property. Registered users get a visitor row
/// linked through `user_id`; visitors entered by hand have none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visitor {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

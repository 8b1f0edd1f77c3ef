//! Status-check records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One connectivity probe logged by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    /// New record with a fresh id, stamped now.
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Request body for creating a status check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl From<StatusCheckCreate> for StatusCheck {
    fn from(input: StatusCheckCreate) -> Self {
        StatusCheck::new(input.client_name)
    }
}

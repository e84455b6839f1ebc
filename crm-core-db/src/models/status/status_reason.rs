use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::customer::CustomerStatus;
use crate::models::identifiable::{CustomerOwned, Identifiable};

/// Why a customer moved to `status`. One append-only row per status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReasonModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub reason: String,
    /// Status the customer moved to
    pub status: CustomerStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for StatusReasonModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl CustomerOwned for StatusReasonModel {
    fn get_customer_id(&self) -> Uuid {
        self.customer_id
    }
}

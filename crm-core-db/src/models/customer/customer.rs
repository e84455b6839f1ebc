use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::customer::customer_status::CustomerStatus;
use crate::models::identifiable::Identifiable;

/// # Documentation
/// Database model for the customer root aggregate.
///
/// - `status` changes only through the status transition engine.
/// - `deleted_at` is the soft-delete marker; customers are never hard-deleted
///   by the audited path.
/// - `code` is unique when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerModel {
    pub id: Uuid,
    pub name: String,
    pub brand_name: Option<String>,
    pub code: Option<HeaplessString<50>>,
    pub account_manager_id: Option<String>,
    /// Relative storage path of the full-size logo
    pub logo: Option<String>,
    pub logo_small: Option<String>,
    pub status: CustomerStatus,
    pub category: Option<String>,
    pub rating: Decimal,
    pub average_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CustomerModel {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Identifiable for CustomerModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

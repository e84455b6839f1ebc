use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::customer::CustomerModel;
use crate::models::identifiable::{CustomerOwned, Identifiable};
use crate::utils::hash_as_i64;

pub const HISTORY_CREATED: &str = "Created";
pub const HISTORY_UPDATED: &str = "Updated";
pub const HISTORY_DELETED: &str = "Deleted";
pub const HISTORY_LOGO_UPLOADED: &str = "Logo Uploaded";
pub const HISTORY_STATUS_CHANGED: &str = "Status Changed";

/// # Documentation
/// Immutable history record appended after every mutating customer operation.
///
/// - One row per committed mutation, never updated or deleted.
/// - `status` is the operation label (`Created`, `Updated`, ...), not the
///   customer status.
/// - `snapshot` is the customer row as it stood after the operation.
/// - `hash` is computed over `snapshot` and detects tampering with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryCustomerModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub notes: Option<String>,
    pub snapshot: serde_json::Value,
    pub hash: i64,
    pub created_at: DateTime<Utc>,
}

impl HistoryCustomerModel {
    /// Builds a record for `customer` with the snapshot and its hash filled in.
    pub fn for_customer(
        id: Uuid,
        customer: &CustomerModel,
        user_id: Uuid,
        status: &str,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, String> {
        let snapshot = serde_json::to_value(customer)
            .map_err(|e| format!("Failed to snapshot customer {}: {e}", customer.id))?;
        let hash = hash_as_i64(&snapshot)?;
        Ok(Self {
            id,
            customer_id: customer.id,
            user_id,
            status: status.to_string(),
            notes,
            snapshot,
            hash,
            created_at,
        })
    }

    /// True when the stored hash still matches the snapshot.
    pub fn verify_hash(&self) -> bool {
        matches!(hash_as_i64(&self.snapshot), Ok(hash) if hash == self.hash)
    }
}

impl Identifiable for HistoryCustomerModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl CustomerOwned for HistoryCustomerModel {
    fn get_customer_id(&self) -> Uuid {
        self.customer_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::CustomerStatus;
    use rust_decimal::Decimal;

    fn customer() -> CustomerModel {
        let now = Utc::now();
        CustomerModel {
            id: Uuid::now_v7(),
            name: "Acme".to_string(),
            brand_name: Some("ACME".to_string()),
            code: None,
            account_manager_id: None,
            logo: None,
            logo_small: None,
            status: CustomerStatus::Active,
            category: Some("Technology".to_string()),
            rating: Decimal::new(45, 1),
            average_cost: Decimal::ZERO,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_snapshot_hash_detects_tampering() {
        let customer = customer();
        let mut record = HistoryCustomerModel::for_customer(
            Uuid::now_v7(),
            &customer,
            Uuid::now_v7(),
            HISTORY_CREATED,
            None,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(record.customer_id, customer.id);
        assert_eq!(record.snapshot["name"], "Acme");
        assert!(record.verify_hash());

        record.snapshot["name"] = serde_json::Value::String("Evil Corp".to_string());
        assert!(!record.verify_hash());
    }
}

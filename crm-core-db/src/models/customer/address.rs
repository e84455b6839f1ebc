use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{CustomerOwned, Identifiable};

/// Postal address of a customer. At most one address per customer is main.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub address: String,
    pub is_main: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for AddressModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl CustomerOwned for AddressModel {
    fn get_customer_id(&self) -> Uuid {
        self.customer_id
    }
}

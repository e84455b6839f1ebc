use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{CustomerOwned, Identifiable};

/// Free-form key/value attribute of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub key: HeaplessString<100>,
    pub value: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for OtherModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl CustomerOwned for OtherModel {
    fn get_customer_id(&self) -> Uuid {
        self.customer_id
    }
}

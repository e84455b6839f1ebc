use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{CustomerOwned, Identifiable};

/// Social media account of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SosmedModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Display name, the platform name unless set otherwise
    pub name: String,
    pub platform: HeaplessString<50>,
    pub handle: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for SosmedModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl CustomerOwned for SosmedModel {
    fn get_customer_id(&self) -> Uuid {
        self.customer_id
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Customer group (industry, parent group, ...). Exists independently of any
/// customer and is linked through `customer_group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupModel {
    pub id: Uuid,
    pub name_group: String,
    pub value: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for GroupModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

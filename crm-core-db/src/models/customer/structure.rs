use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{CustomerOwned, Identifiable};

/// # Documentation
/// Node of a customer's organizational tree.
///
/// - `parent_id` is `None` for roots, otherwise the id of a node of the same
///   customer that was persisted earlier in the same write.
/// - `position` is the node's index in the declaration list and fixes the
///   order nodes are read back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub level: i32,
    pub address: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StructureModel {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Identifiable for StructureModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl CustomerOwned for StructureModel {
    fn get_customer_id(&self) -> Uuid {
        self.customer_id
    }
}

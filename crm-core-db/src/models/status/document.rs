use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{CustomerOwned, Identifiable};

pub const DOCUMENT_TYPE_STATUS_CHANGE: &str = "StatusChange";

/// # Documentation
/// File artifact attached to a customer.
///
/// `url_file` is the storage path relative to the upload root. The row is
/// written inside the status change transaction; the bytes are written to
/// storage after commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// User who uploaded the document
    pub user_id: Uuid,
    pub notes: Option<String>,
    pub doc_type: HeaplessString<50>,
    pub url_file: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for DocumentModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl CustomerOwned for DocumentModel {
    fn get_customer_id(&self) -> Uuid {
        self.customer_id
    }
}

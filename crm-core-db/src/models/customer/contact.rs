use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{CustomerOwned, Identifiable};

/// # Documentation
/// Contact person at a customer.
///
/// At most one contact per customer carries `is_main`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub birthdate: Option<NaiveDate>,
    pub job_position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub is_main: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for ContactModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl CustomerOwned for ContactModel {
    fn get_customer_id(&self) -> Uuid {
        self.customer_id
    }
}

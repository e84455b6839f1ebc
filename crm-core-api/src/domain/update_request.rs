use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CrmError, CrmResult};

/// Partial update of the customer's scalar columns.
///
/// Status is absent: it only changes through the status
/// transition endpoint. Unknown fields (including `status`) are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub brand_name: Option<String>,
    #[validate(length(max = 50))]
    pub code: Option<String>,
    pub account_manager_id: Option<String>,
    pub logo_small: Option<String>,
    pub category: Option<String>,
    pub rating: Option<Decimal>,
    pub average_cost: Option<Decimal>,
}

impl UpdateCustomerRequest {
    pub fn validate_request(&self) -> CrmResult<()> {
        if matches!(self.name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(CrmError::validation("name cannot be blank"));
        }
        self.validate()?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.brand_name.is_none()
            && self.code.is_none()
            && self.account_manager_id.is_none()
            && self.logo_small.is_none()
            && self.category.is_none()
            && self.rating.is_none()
            && self.average_cost.is_none()
    }
}

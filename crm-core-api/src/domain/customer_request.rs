use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CrmError, CrmResult};

fn default_true() -> bool {
    true
}

/// Comprehensive customer creation request.
///
/// Carries the customer columns plus every dependent collection that is
/// written in the same transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[validate(length(max = 255))]
    pub brand_name: Option<String>,
    #[validate(length(max = 50))]
    pub code: Option<String>,
    pub account_manager_id: Option<String>,
    pub logo: Option<String>,
    pub logo_small: Option<String>,
    /// Initial status label. Defaults to `Active` when absent.
    #[serde(alias = "status_name")]
    pub status: Option<String>,
    pub category: Option<String>,
    pub rating: Option<Decimal>,
    pub average_cost: Option<Decimal>,
    #[serde(default)]
    #[validate(nested)]
    pub addresses: Vec<CreateAddressRequest>,
    #[serde(default)]
    #[validate(nested)]
    pub socials: Vec<CreateSocialRequest>,
    #[serde(default)]
    #[validate(nested)]
    pub contacts: Vec<CreateContactRequest>,
    #[serde(default)]
    #[validate(nested)]
    pub structures: Vec<CreateStructureRequest>,
    #[serde(default)]
    pub groups: Option<CreateGroupsRequest>,
    #[serde(default)]
    #[validate(nested)]
    pub others: Vec<CreateOtherRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    #[validate(length(min = 1, max = 255, message = "address name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "address text is required"))]
    pub address: String,
    #[serde(default)]
    pub is_main: bool,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSocialRequest {
    #[validate(length(min = 1, max = 50, message = "platform is required"))]
    pub platform: String,
    #[validate(length(min = 1, max = 255, message = "handle is required"))]
    pub handle: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 255, message = "contact name is required"))]
    pub name: String,
    /// `YYYY-MM-DD`
    pub birthdate: Option<String>,
    pub job_position: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    #[serde(default)]
    pub is_main: bool,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl CreateContactRequest {
    pub fn parsed_birthdate(&self) -> CrmResult<Option<NaiveDate>> {
        match self.birthdate.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    CrmError::validation(format!(
                        "contact '{}': birthdate '{raw}' is not a YYYY-MM-DD date",
                        self.name
                    ))
                }),
        }
    }
}

/// One node of the organizational structure, addressed by a request-scoped temp key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStructureRequest {
    #[serde(default)]
    pub temp_key: String,
    pub parent_key: Option<String>,
    #[validate(length(min = 1, max = 255, message = "structure name is required"))]
    pub name: String,
    pub level: i32,
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl CreateStructureRequest {
    /// The parent key, treating an empty string the same as an absent key.
    pub fn parent_key(&self) -> Option<&str> {
        self.parent_key.as_deref().filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupsRequest {
    pub industry_id: Option<String>,
    #[serde(default)]
    pub industry_active: bool,
    pub parent_group_id: Option<String>,
    #[serde(default)]
    pub parent_group_active: bool,
}

/// Which slot of the groups directive a group reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupDirective {
    Industry,
    ParentGroup,
}

impl CreateGroupsRequest {
    /// Group references the caller asked to link: an id is present and its active flag is set.
    pub fn requested(&self) -> Vec<(GroupDirective, &str)> {
        let mut requested = Vec::with_capacity(2);
        if let Some(id) = self.industry_id.as_deref().filter(|id| !id.trim().is_empty()) {
            if self.industry_active {
                requested.push((GroupDirective::Industry, id.trim()));
            }
        }
        if let Some(id) = self.parent_group_id.as_deref().filter(|id| !id.trim().is_empty()) {
            if self.parent_group_active {
                requested.push((GroupDirective::ParentGroup, id.trim()));
            }
        }
        requested
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOtherRequest {
    #[validate(length(min = 1, max = 100, message = "attribute key is required"))]
    pub key: String,
    pub value: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl CreateCustomerRequest {
    /// Full request validation run before any transaction is opened.
    ///
    /// Structure hierarchy is checked separately by the hierarchy resolver.
    pub fn validate_request(&self) -> CrmResult<()> {
        if self.name.trim().is_empty() {
            return Err(CrmError::validation("name is required"));
        }
        self.validate()?;

        let main_addresses = self.addresses.iter().filter(|a| a.is_main).count();
        if main_addresses > 1 {
            return Err(CrmError::validation(format!(
                "at most one main address is allowed, got {main_addresses}"
            )));
        }
        let main_contacts = self.contacts.iter().filter(|c| c.is_main).count();
        if main_contacts > 1 {
            return Err(CrmError::validation(format!(
                "at most one main contact is allowed, got {main_contacts}"
            )));
        }
        for contact in &self.contacts {
            contact.parsed_birthdate()?;
        }
        Ok(())
    }

    /// Trimmed code, `None` when blank.
    pub fn normalized_code(&self) -> Option<&str> {
        self.code.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: "Acme".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let request: CreateCustomerRequest = serde_json::from_str(r#"{"brandName":"X"}"#).unwrap();
        let err = request.validate_request().unwrap_err();
        assert!(matches!(err, CrmError::Validation(_)));

        let blank = CreateCustomerRequest {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(blank.validate_request(), Err(CrmError::Validation(_))));
    }

    #[test]
    fn test_deserialize_camel_case_payload() {
        let request: CreateCustomerRequest = serde_json::from_str(
            r#"{
                "name": "PT Digital Inovasi Indonesia",
                "brandName": "DigiInno",
                "code": "DIGI",
                "accountManagerId": "AM-001",
                "logo": null,
                "addresses": [{"name": "Head Office", "address": "Jl. Sudirman No. 123", "isMain": true, "active": true}],
                "socials": [{"platform": "Instagram", "handle": "@digiinno_id", "active": true}],
                "contacts": [{"name": "Budi Santoso", "birthdate": "1985-03-15", "jobPosition": "CEO", "email": "budi@digiinno.com", "isMain": true}],
                "structures": [
                    {"tempKey": "1", "parentKey": null, "name": "Board of Directors", "level": 1},
                    {"tempKey": "2", "parentKey": "1", "name": "Technology Division", "level": 2}
                ],
                "groups": {"industryId": "1", "industryActive": true, "parentGroupId": "2", "parentGroupActive": false},
                "others": [{"key": "company_size", "value": "50-100 employees"}]
            }"#,
        )
        .unwrap();

        assert_eq!(request.brand_name.as_deref(), Some("DigiInno"));
        assert_eq!(request.structures[1].parent_key(), Some("1"));
        assert_eq!(request.structures[0].parent_key(), None);
        assert!(request.contacts[0].active);
        assert!(request.others[0].active);
        assert!(request.validate_request().is_ok());

        let groups = request.groups.as_ref().unwrap().requested();
        assert_eq!(groups, vec![(GroupDirective::Industry, "1")]);
    }

    #[test]
    fn test_legacy_status_name_alias() {
        let request: CreateCustomerRequest =
            serde_json::from_str(r#"{"name": "Acme", "status_name": "Draft"}"#).unwrap();
        assert_eq!(request.status.as_deref(), Some("Draft"));
    }

    #[test]
    fn test_two_main_addresses_rejected() {
        let mut request = acme();
        for name in ["HQ", "Branch"] {
            request.addresses.push(CreateAddressRequest {
                name: name.to_string(),
                address: "Somewhere".to_string(),
                is_main: true,
                active: true,
            });
        }
        let err = request.validate_request().unwrap_err();
        assert!(err.to_string().contains("main address"));
    }

    #[test]
    fn test_two_main_contacts_rejected() {
        let mut request = acme();
        for name in ["Budi", "Sari"] {
            request.contacts.push(CreateContactRequest {
                name: name.to_string(),
                is_main: true,
                active: true,
                ..Default::default()
            });
        }
        assert!(matches!(request.validate_request(), Err(CrmError::Validation(_))));
    }

    #[test]
    fn test_bad_birthdate_rejected() {
        let mut request = acme();
        request.contacts.push(CreateContactRequest {
            name: "Budi".to_string(),
            birthdate: Some("15/03/1985".to_string()),
            active: true,
            ..Default::default()
        });
        let err = request.validate_request().unwrap_err();
        assert!(err.to_string().contains("birthdate"));
    }

    #[test]
    fn test_empty_birthdate_is_none() {
        let contact = CreateContactRequest {
            name: "Budi".to_string(),
            birthdate: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(contact.parsed_birthdate().unwrap(), None);
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut request = acme();
        request.contacts.push(CreateContactRequest {
            name: "Budi".to_string(),
            email: Some("not-an-email".to_string()),
            active: true,
            ..Default::default()
        });
        assert!(matches!(request.validate_request(), Err(CrmError::Validation(_))));
    }

    #[test]
    fn test_group_directive_requires_active_flag_and_id() {
        let groups = CreateGroupsRequest {
            industry_id: Some("  ".to_string()),
            industry_active: true,
            parent_group_id: Some("abc".to_string()),
            parent_group_active: true,
        };
        assert_eq!(groups.requested(), vec![(GroupDirective::ParentGroup, "abc")]);
    }

    #[test]
    fn test_normalized_code() {
        let mut request = acme();
        request.code = Some("  ".to_string());
        assert_eq!(request.normalized_code(), None);
        request.code = Some(" ACME ".to_string());
        assert_eq!(request.normalized_code(), Some("ACME"));
    }
}

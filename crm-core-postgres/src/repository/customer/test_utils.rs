use crm_core_db::models::customer::{
    AddressModel, ContactModel, CustomerModel, CustomerStatus, GroupModel, StructureModel,
};
use crm_core_db::utils::{allocate_id, now_micros};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// Customer with a unique code so tests never collide on the code index.
pub fn new_test_customer(name: &str) -> CustomerModel {
    let now = now_micros();
    let id = allocate_id();
    let code = format!("T-{}", &id.simple().to_string()[20..]);
    CustomerModel {
        id,
        name: name.to_string(),
        brand_name: None,
        code: HeaplessString::from_str(&code).ok(),
        account_manager_id: None,
        logo: None,
        logo_small: None,
        status: CustomerStatus::Active,
        category: None,
        rating: Decimal::ZERO,
        average_cost: Decimal::ZERO,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

pub fn new_test_address(customer_id: Uuid, name: &str, is_main: bool) -> AddressModel {
    let now = now_micros();
    AddressModel {
        id: allocate_id(),
        customer_id,
        name: name.to_string(),
        address: "Jl. Sudirman No. 123".to_string(),
        is_main,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn new_test_contact(customer_id: Uuid, name: &str) -> ContactModel {
    let now = now_micros();
    ContactModel {
        id: allocate_id(),
        customer_id,
        name: name.to_string(),
        birthdate: None,
        job_position: None,
        email: None,
        phone: None,
        mobile: None,
        is_main: false,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn new_test_structure(
    customer_id: Uuid,
    name: &str,
    parent_id: Option<Uuid>,
    position: i32,
) -> StructureModel {
    let now = now_micros();
    StructureModel {
        id: allocate_id(),
        customer_id,
        parent_id,
        name: name.to_string(),
        level: position + 1,
        address: None,
        position,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn new_test_group(name_group: &str, value: &str) -> GroupModel {
    let now = now_micros();
    GroupModel {
        id: allocate_id(),
        name_group: name_group.to_string(),
        value: Some(value.to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

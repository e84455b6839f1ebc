use serde::{Deserialize, Serialize};

use crate::models::customer::{
    AddressModel, ContactModel, CustomerModel, GroupModel, OtherModel, SosmedModel,
    StructureModel,
};

/// A customer together with every dependent collection, as read back after a write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAggregate {
    pub customer: CustomerModel,
    pub addresses: Vec<AddressModel>,
    pub sosmeds: Vec<SosmedModel>,
    pub contacts: Vec<ContactModel>,
    pub structures: Vec<StructureModel>,
    pub groups: Vec<GroupModel>,
    pub others: Vec<OtherModel>,
}

impl CustomerAggregate {
    pub fn main_address(&self) -> Option<&AddressModel> {
        self.addresses.iter().find(|a| a.is_main)
    }

    pub fn main_contact(&self) -> Option<&ContactModel> {
        self.contacts.iter().find(|c| c.is_main)
    }

    pub fn structure_roots(&self) -> impl Iterator<Item = &StructureModel> {
        self.structures.iter().filter(|s| s.is_root())
    }

    pub fn structure_children<'a>(
        &'a self,
        parent: &'a StructureModel,
    ) -> impl Iterator<Item = &'a StructureModel> + 'a {
        self.structures
            .iter()
            .filter(move |s| s.parent_id == Some(parent.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::CustomerStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn structure(customer_id: Uuid, name: &str, parent_id: Option<Uuid>, position: i32) -> StructureModel {
        let now = Utc::now();
        StructureModel {
            id: Uuid::now_v7(),
            customer_id,
            parent_id,
            name: name.to_string(),
            level: if parent_id.is_some() { 2 } else { 1 },
            address: None,
            position,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_structure_navigation() {
        let now = Utc::now();
        let customer = CustomerModel {
            id: Uuid::now_v7(),
            name: "Acme".to_string(),
            brand_name: None,
            code: None,
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
        };
        let board = structure(customer.id, "Board", None, 0);
        let tech = structure(customer.id, "Tech", Some(board.id), 1);

        let aggregate = CustomerAggregate {
            customer,
            addresses: vec![],
            sosmeds: vec![],
            contacts: vec![],
            structures: vec![board.clone(), tech.clone()],
            groups: vec![],
            others: vec![],
        };

        let roots: Vec<_> = aggregate.structure_roots().collect();
        assert_eq!(roots, vec![&board]);
        let children: Vec<_> = aggregate.structure_children(&board).collect();
        assert_eq!(children, vec![&tech]);
        assert!(aggregate.main_address().is_none());
    }
}

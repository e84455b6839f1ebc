//! Turns the flat, temp-keyed structure list of a create request into
//! structure rows with real parent ids.
//!
//! Resolution is one left-to-right pass. A node may only reference a key
//! declared strictly before it; nodes are never reordered.

use chrono::{DateTime, Utc};
use crm_core_api::{CreateStructureRequest, CrmError};
use crm_core_db::models::customer::StructureModel;
use crm_core_db::utils::allocate_id;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Upper bound on structure nodes in one request; positions are stored as `INTEGER`.
pub const MAX_STRUCTURE_NODES: usize = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("{count} structure nodes given, at most {max} are allowed")]
    TooManyNodes { count: usize, max: usize },

    #[error("structure #{index} '{name}': duplicate temp key '{key}'")]
    DuplicateKey { index: usize, name: String, key: String },

    #[error("structure #{index} '{name}': parent key '{parent_key}' refers to itself")]
    SelfReference {
        index: usize,
        name: String,
        parent_key: String,
    },

    /// The parent key is unknown or is only declared later in the list.
    #[error("structure #{index} '{name}': parent key '{parent_key}' is not declared before it")]
    UnresolvedParent {
        index: usize,
        name: String,
        parent_key: String,
    },
}

impl From<HierarchyError> for CrmError {
    fn from(err: HierarchyError) -> Self {
        CrmError::Validation(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedHierarchy {
    /// Temp key to allocated id, for every node with a non-empty temp key
    pub key_map: HashMap<String, Uuid>,
    /// Rows in declaration order; parents always precede their children
    pub nodes: Vec<StructureModel>,
}

pub fn resolve_hierarchy(
    customer_id: Uuid,
    requests: &[CreateStructureRequest],
    now: DateTime<Utc>,
) -> Result<ResolvedHierarchy, HierarchyError> {
    if requests.len() > MAX_STRUCTURE_NODES {
        return Err(HierarchyError::TooManyNodes {
            count: requests.len(),
            max: MAX_STRUCTURE_NODES,
        });
    }
    let mut key_map: HashMap<String, Uuid> = HashMap::with_capacity(requests.len());
    let mut nodes = Vec::with_capacity(requests.len());

    for (index, request) in requests.iter().enumerate() {
        let temp_key = request.temp_key.as_str();

        let parent_id = match request.parent_key() {
            None => None,
            Some(parent_key) if parent_key == temp_key => {
                return Err(HierarchyError::SelfReference {
                    index,
                    name: request.name.clone(),
                    parent_key: parent_key.to_string(),
                });
            }
            Some(parent_key) => match key_map.get(parent_key) {
                Some(id) => Some(*id),
                None => {
                    return Err(HierarchyError::UnresolvedParent {
                        index,
                        name: request.name.clone(),
                        parent_key: parent_key.to_string(),
                    });
                }
            },
        };

        let position = i32::try_from(index).map_err(|_| HierarchyError::TooManyNodes {
            count: requests.len(),
            max: MAX_STRUCTURE_NODES,
        })?;
        let id = allocate_id();
        if !temp_key.is_empty() {
            if key_map.contains_key(temp_key) {
                return Err(HierarchyError::DuplicateKey {
                    index,
                    name: request.name.clone(),
                    key: temp_key.to_string(),
                });
            }
            key_map.insert(temp_key.to_string(), id);
        }

        nodes.push(StructureModel {
            id,
            customer_id,
            parent_id,
            name: request.name.clone(),
            level: request.level,
            address: request.address.clone(),
            position,
            is_active: request.active,
            created_at: now,
            updated_at: now,
        });
    }

    Ok(ResolvedHierarchy { key_map, nodes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(temp_key: &str, parent_key: Option<&str>, name: &str, level: i32) -> CreateStructureRequest {
        CreateStructureRequest {
            temp_key: temp_key.to_string(),
            parent_key: parent_key.map(str::to_string),
            name: name.to_string(),
            level,
            address: None,
            active: true,
        }
    }

    #[test]
    fn test_parent_ids_mirror_temp_keys() {
        let customer_id = Uuid::new_v4();
        let requests = vec![
            node("1", None, "Board of Directors", 1),
            node("2", Some("1"), "Technology Division", 2),
            node("3", Some("2"), "Software Development", 3),
            node("4", Some("1"), "Finance", 2),
        ];

        let resolved = resolve_hierarchy(customer_id, &requests, Utc::now()).unwrap();
        let ids: Vec<_> = resolved.nodes.iter().map(|n| n.id).collect();

        assert_eq!(resolved.nodes[0].parent_id, None);
        assert_eq!(resolved.nodes[1].parent_id, Some(ids[0]));
        assert_eq!(resolved.nodes[2].parent_id, Some(ids[1]));
        assert_eq!(resolved.nodes[3].parent_id, Some(ids[0]));
        assert_eq!(resolved.key_map["3"], ids[2]);
        assert!(resolved.nodes.iter().all(|n| n.customer_id == customer_id));
        let positions: Vec<_> = resolved.nodes.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_parent_key_is_root() {
        let requests = vec![node("a", Some(""), "Root", 1)];
        let resolved = resolve_hierarchy(Uuid::new_v4(), &requests, Utc::now()).unwrap();
        assert!(resolved.nodes[0].is_root());
    }

    #[test]
    fn test_forward_reference_is_rejected() {
        let requests = vec![node("1", Some("2"), "Child", 2), node("2", None, "Parent", 1)];
        let err = resolve_hierarchy(Uuid::new_v4(), &requests, Utc::now()).unwrap_err();
        assert!(matches!(err, HierarchyError::UnresolvedParent { index: 0, .. }));
    }

    #[test]
    fn test_undeclared_parent_is_rejected() {
        let requests = vec![node("1", None, "Board", 1), node("2", Some("99"), "Orphan", 2)];
        let err = resolve_hierarchy(Uuid::new_v4(), &requests, Utc::now()).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::UnresolvedParent {
                index: 1,
                name: "Orphan".to_string(),
                parent_key: "99".to_string(),
            }
        );
        assert!(matches!(CrmError::from(err), CrmError::Validation(msg) if msg.contains("'99'")));
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let requests = vec![node("1", Some("1"), "Loop", 1)];
        let err = resolve_hierarchy(Uuid::new_v4(), &requests, Utc::now()).unwrap_err();
        assert!(matches!(err, HierarchyError::SelfReference { .. }));
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let requests = vec![node("1", None, "Board", 1), node("1", None, "Board again", 1)];
        let err = resolve_hierarchy(Uuid::new_v4(), &requests, Utc::now()).unwrap_err();
        assert!(matches!(err, HierarchyError::DuplicateKey { index: 1, .. }));
    }

    #[test]
    fn test_unkeyed_node_is_kept_but_not_referenceable() {
        let requests = vec![node("", None, "Anonymous", 1), node("x", None, "Keyed", 1)];
        let resolved = resolve_hierarchy(Uuid::new_v4(), &requests, Utc::now()).unwrap();
        assert_eq!(resolved.nodes.len(), 2);
        assert_eq!(resolved.key_map.len(), 1);

        let referencing = vec![node("", None, "Anonymous", 1), node("x", Some(""), "Keyed", 1)];
        let resolved = resolve_hierarchy(Uuid::new_v4(), &referencing, Utc::now()).unwrap();
        assert!(resolved.nodes[1].is_root());
    }

    #[test]
    fn test_node_count_is_bounded() {
        let at_limit = vec![node("", None, "Team", 1); MAX_STRUCTURE_NODES];
        let resolved = resolve_hierarchy(Uuid::new_v4(), &at_limit, Utc::now()).unwrap();
        assert_eq!(resolved.nodes.last().map(|n| n.position), Some(MAX_STRUCTURE_NODES as i32 - 1));

        let over = vec![node("", None, "Team", 1); MAX_STRUCTURE_NODES + 1];
        let err = resolve_hierarchy(Uuid::new_v4(), &over, Utc::now()).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::TooManyNodes {
                count: MAX_STRUCTURE_NODES + 1,
                max: MAX_STRUCTURE_NODES
            }
        );
        assert!(matches!(CrmError::from(err), CrmError::Validation(_)));
    }

    #[test]
    fn test_empty_input() {
        let resolved = resolve_hierarchy(Uuid::new_v4(), &[], Utc::now()).unwrap();
        assert!(resolved.nodes.is_empty());
        assert!(resolved.key_map.is_empty());
    }
}

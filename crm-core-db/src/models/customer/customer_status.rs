use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a customer.
///
/// This enum is the single place where the set of recognised status labels
/// is defined. Any recognised status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "customer_status", rename_all = "PascalCase")]
pub enum CustomerStatus {
    Active,
    Blocked,
    Draft,
}

impl CustomerStatus {
    pub const ALL: [CustomerStatus; 3] = [
        CustomerStatus::Active,
        CustomerStatus::Blocked,
        CustomerStatus::Draft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "Active",
            CustomerStatus::Blocked => "Blocked",
            CustomerStatus::Draft => "Draft",
        }
    }

    /// Comma separated list of accepted labels, for error messages.
    pub fn accepted_labels() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for CustomerStatus {
    fn default() -> Self {
        CustomerStatus::Active
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Case-insensitive; surrounding whitespace is ignored.
impl FromStr for CustomerStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(label))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognised_labels() {
        assert_eq!("Active".parse::<CustomerStatus>(), Ok(CustomerStatus::Active));
        assert_eq!("blocked".parse::<CustomerStatus>(), Ok(CustomerStatus::Blocked));
        assert_eq!(" DRAFT ".parse::<CustomerStatus>(), Ok(CustomerStatus::Draft));
    }

    #[test]
    fn test_unrecognised_labels() {
        for label in ["suspended", "", "Inactive", "activ"] {
            assert!(label.parse::<CustomerStatus>().is_err(), "{label} should be rejected");
        }
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for status in CustomerStatus::ALL {
            assert_eq!(status.to_string().parse::<CustomerStatus>(), Ok(status));
        }
        assert_eq!(CustomerStatus::accepted_labels(), "Active, Blocked, Draft");
    }
}

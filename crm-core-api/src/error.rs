use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrmError {
    /// Malformed or missing input, unrecognized enum value. Never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// An insert/update inside the transaction failed; the transaction was rolled back.
    #[error("Persist error: {0}")]
    Persist(String),

    #[error("Commit error: {0}")]
    Commit(String),

    /// History append failed after the primary operation committed.
    #[error("Audit error: {0}")]
    Audit(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CrmError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CrmError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        CrmError::NotFound(msg.into())
    }

    pub fn persist(msg: impl std::fmt::Display) -> Self {
        CrmError::Persist(msg.to_string())
    }

    /// True for errors caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CrmError::Validation(_) | CrmError::NotFound(_) | CrmError::Unauthorized(_)
        )
    }
}

impl From<validator::ValidationErrors> for CrmError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CrmError::Validation(errors.to_string())
    }
}

pub type CrmResult<T> = Result<T, CrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(CrmError::validation("bad").is_client_error());
        assert!(CrmError::not_found("customer").is_client_error());
        assert!(!CrmError::persist("insert failed").is_client_error());
        assert!(!CrmError::Audit("history".to_string()).is_client_error());
    }

    #[test]
    fn test_display_carries_message() {
        let err = CrmError::validation("name is required");
        assert_eq!(err.to_string(), "Validation error: name is required");
    }
}

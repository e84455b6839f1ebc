//! Business operations on the customer aggregate.
//!
//! Every mutation follows the same shape: validate, run the writes in one
//! transaction bounded by [`ServiceConfig::tx_timeout`], commit, then do the
//! post-commit work (file bytes, audit record). Post-commit failures never
//! undo the mutation; they are returned as warnings.

pub mod aggregate_reader;
pub mod aggregate_writer;
pub mod audit_trail;
pub mod customer_maintenance;
pub mod file_store;
pub mod hierarchy_resolver;
pub mod status_transition;

pub use aggregate_writer::{AggregateWriter, CreateOutcome, SkippedAssociation};
pub use audit_trail::AuditTrailRecorder;
pub use customer_maintenance::{CustomerMaintenance, CustomerMutation};
pub use file_store::{FileStore, LocalFileStore};
pub use hierarchy_resolver::{resolve_hierarchy, HierarchyError, ResolvedHierarchy};
pub use status_transition::{StatusChangeOutcome, StatusDetails, StatusTransitionEngine};

use crm_core_api::{CrmError, CrmResult};
use crm_core_db::models::customer::CustomerStatus;
use sqlx::PgPool;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::postgres_repositories::PostgresRepositories;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upper bound for the transactional part of one operation
    pub tx_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tx_timeout: Duration::from_secs(30),
        }
    }
}

/// All services, wired to one pool and file store
#[derive(Clone)]
pub struct CrmServices {
    pub aggregate_writer: Arc<AggregateWriter>,
    pub status_engine: Arc<StatusTransitionEngine>,
    pub audit_trail: Arc<AuditTrailRecorder>,
    pub maintenance: Arc<CustomerMaintenance>,
}

impl CrmServices {
    pub fn new(pool: PgPool, file_store: Arc<dyn FileStore>, config: ServiceConfig) -> Self {
        let repos = PostgresRepositories::new(pool);
        let audit_trail = Arc::new(AuditTrailRecorder::new(repos.clone()));
        Self {
            aggregate_writer: Arc::new(AggregateWriter::new(
                repos.clone(),
                audit_trail.clone(),
                config.clone(),
            )),
            status_engine: Arc::new(StatusTransitionEngine::new(
                repos.clone(),
                audit_trail.clone(),
                file_store.clone(),
                config.clone(),
            )),
            maintenance: Arc::new(CustomerMaintenance::new(
                repos,
                audit_trail.clone(),
                file_store,
                config,
            )),
            audit_trail,
        }
    }
}

pub(crate) fn persist(context: &str, err: impl Display) -> CrmError {
    tracing::warn!(error = %err, "{context} failed");
    CrmError::Persist(format!("{context}: {err}"))
}

pub(crate) fn commit_failed(err: impl Display) -> CrmError {
    tracing::error!(error = %err, "commit failed");
    CrmError::Commit(err.to_string())
}

/// The one place status labels from callers are turned into a status.
pub(crate) fn parse_status(label: &str) -> CrmResult<CustomerStatus> {
    label.parse().map_err(|_| {
        CrmError::validation(format!(
            "unrecognized status '{}', expected one of: {}",
            label.trim(),
            CustomerStatus::accepted_labels()
        ))
    })
}

/// Runs the transactional part of an operation. On expiry the future is
/// dropped, which drops its open transaction and rolls it back.
pub(crate) async fn within_deadline<T>(
    deadline: Duration,
    fut: impl Future<Output = CrmResult<T>>,
) -> CrmResult<T> {
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(?deadline, "transaction deadline exceeded, rolling back");
            Err(CrmError::Persist(format!(
                "transaction did not finish within {}ms",
                deadline.as_millis()
            )))
        }
    }
}

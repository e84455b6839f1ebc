//! HTTP surface of the customer record store.
//!
//! Every `/api` route requires a bearer token; the token identifies the
//! acting user that is recorded in the audit trail.

pub mod auth;
pub mod config;
pub mod error;
pub mod router;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use router::build_router;
pub use state::AppState;

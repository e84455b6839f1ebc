//! Customer REST handlers.
//!
//! POST   /api/customers                create the customer aggregate
//! GET    /api/customers/:id            customer with all dependents
//! PUT    /api/customers/:id            partial update of scalar fields
//! DELETE /api/customers/:id            soft delete
//! POST   /api/customers/:id/status     status change (multipart)
//! GET    /api/customers/:id/status     status reasons and documents
//! GET    /api/customers/:id/history    audit trail, optionally paged
//! POST   /api/customers/:id/logo       logo upload (multipart)

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use crm_core_api::{CreateCustomerRequest, CrmError, StatusChangeRequest, UpdateCustomerRequest};
use crm_core_db::models::customer::CustomerAggregate;
use crm_core_db::repository::pagination::PageRequest;
use crm_core_postgres::service::{CreateOutcome, CustomerMutation, StatusChangeOutcome, StatusDetails};
use serde::Deserialize;
use uuid::Uuid;

use super::multipart_form::MultipartForm;
use crate::auth::ActingUser;
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_HISTORY_PAGE_SIZE: usize = 20;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

pub async fn create_customer(
    State(state): State<AppState>,
    Extension(user): Extension<ActingUser>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateOutcome>), ApiError> {
    let Json(request) = payload?;
    let outcome = state
        .services
        .aggregate_writer
        .create_customer_aggregate(request, user.0)
        .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn get_customer(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<CustomerAggregate>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.services.maintenance.load_aggregate(id).await?))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Extension(user): Extension<ActingUser>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<Json<CustomerMutation>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let mutation = state
        .services
        .maintenance
        .update_customer(id, request, user.0)
        .await?;
    Ok(Json(mutation))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(user): Extension<ActingUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<CustomerMutation>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.services.maintenance.delete_customer(id, user.0).await?))
}

/// Multipart fields: `status`, `reason`, optional `notes`, optional file `file`.
pub async fn change_status(
    State(state): State<AppState>,
    Extension(user): Extension<ActingUser>,
    id: Result<Path<Uuid>, PathRejection>,
    multipart: Multipart,
) -> Result<Json<StatusChangeOutcome>, ApiError> {
    let Path(id) = id?;
    let mut form = MultipartForm::read(multipart).await?;
    let request = StatusChangeRequest {
        status: form.text("status").unwrap_or_default(),
        reason: form.text("reason").unwrap_or_default(),
        notes: form.text("notes"),
    };
    let outcome = state
        .services
        .status_engine
        .change_status(id, request, form.file("file"), user.0)
        .await?;
    Ok(Json(outcome))
}

pub async fn status_details(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<StatusDetails>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.services.status_engine.status_details(id).await?))
}

/// Full history, or one page of it when `page` is given.
pub async fn history(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let audit_trail = &state.services.audit_trail;
    let response = match query.page {
        Some(page) => {
            let page_size = query.page_size.unwrap_or(DEFAULT_HISTORY_PAGE_SIZE);
            let request = PageRequest::for_page(page_size, page).ok_or_else(|| {
                CrmError::validation(format!("page {page} is out of range"))
            })?;
            Json(audit_trail.history_page(id, request).await?).into_response()
        }
        None => Json(audit_trail.history_for(id).await?).into_response(),
    };
    Ok(response)
}

/// Multipart file field `logo`.
pub async fn upload_logo(
    State(state): State<AppState>,
    Extension(user): Extension<ActingUser>,
    id: Result<Path<Uuid>, PathRejection>,
    multipart: Multipart,
) -> Result<Json<CustomerMutation>, ApiError> {
    let Path(id) = id?;
    let mut form = MultipartForm::read(multipart).await?;
    let file = form
        .file("logo")
        .ok_or_else(|| CrmError::validation("multipart file field 'logo' is required"))?;
    let mutation = state
        .services
        .maintenance
        .upload_logo(id, file, user.0)
        .await?;
    Ok(Json(mutation))
}

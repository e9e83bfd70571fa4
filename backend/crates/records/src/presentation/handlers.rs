//! HTTP Handlers
//!
//! Every error is answered with an RFC 7807 document whose `instance` is the
//! request's trace id.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::error::app_error::AppResult;
use platform::telemetry::TraceContext;

use crate::application::{
    AddCustomerUseCase, DeleteCustomerUseCase, FindCustomerUseCase, ListCustomersUseCase,
};
use crate::domain::customer::{Customer, CustomerId};
use crate::domain::repository::CustomerRepository;
use crate::error::RecordError;
use crate::presentation::dto::{
    CustomerCreatedResponse, CustomerInput, CustomerListResponse, LookupParams, MessageResponse,
};

/// Shared state for record handlers
#[derive(Clone)]
pub struct RecordAppState<R>
where
    R: CustomerRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /api/customer?first_name=&last_name=
pub async fn find_customer<R>(
    State(state): State<RecordAppState<R>>,
    trace: TraceContext,
    Query(params): Query<LookupParams>,
) -> AppResult<Json<Customer>>
where
    R: CustomerRepository + Clone + Send + Sync + 'static,
{
    tracing::info!(
        first_name = params.first_name.as_deref().unwrap_or_default(),
        last_name = params.last_name.as_deref().unwrap_or_default(),
        "Customer lookup"
    );

    FindCustomerUseCase::new(state.repo.clone())
        .execute(params.first_name.as_deref(), params.last_name.as_deref())
        .await
        .map(Json)
        .map_err(|e| e.into_problem(&trace))
}

/// POST /api/customer
pub async fn add_customer<R>(
    State(state): State<RecordAppState<R>>,
    trace: TraceContext,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CustomerCreatedResponse>)>
where
    R: CustomerRepository + Clone + Send + Sync + 'static,
{
    let Json(input) = payload
        .map_err(|rejection| RecordError::invalid_input(rejection.body_text()).into_problem(&trace))?;

    let customer_id = AddCustomerUseCase::new(state.repo.clone())
        .execute(input.into())
        .await
        .map_err(|e| e.into_problem(&trace))?;

    Ok((
        StatusCode::CREATED,
        Json(CustomerCreatedResponse {
            message: "Customer added successfully",
            customer_id,
        }),
    ))
}

/// GET /api/customers
pub async fn list_customers<R>(
    State(state): State<RecordAppState<R>>,
    trace: TraceContext,
) -> AppResult<Json<CustomerListResponse>>
where
    R: CustomerRepository + Clone + Send + Sync + 'static,
{
    let customers = ListCustomersUseCase::new(state.repo.clone())
        .execute()
        .await
        .map_err(|e| e.into_problem(&trace))?;

    Ok(Json(CustomerListResponse {
        count: customers.len(),
        customers,
    }))
}

/// DELETE /api/customer/{id}
pub async fn delete_customer<R>(
    State(state): State<RecordAppState<R>>,
    trace: TraceContext,
    id: Result<Path<CustomerId>, PathRejection>,
) -> AppResult<Json<MessageResponse>>
where
    R: CustomerRepository + Clone + Send + Sync + 'static,
{
    let Path(id) =
        id.map_err(|_| RecordError::invalid_input("id must be an integer").into_problem(&trace))?;

    DeleteCustomerUseCase::new(state.repo.clone())
        .execute(id)
        .await
        .map_err(|e| e.into_problem(&trace))?;

    Ok(Json(MessageResponse {
        message: "Customer deleted successfully",
    }))
}

//! Records Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::domain::repository::CustomerRepository;
use crate::infra::postgres::PgCustomerRepository;
use crate::presentation::handlers::{self, RecordAppState};

/// Create the records router with the PostgreSQL repository
pub fn records_router(repo: PgCustomerRepository) -> Router {
    records_router_generic(repo)
}

/// Create a generic records router for any repository implementation
///
/// Paths are relative; the binary nests this under `/api`.
pub fn records_router_generic<R>(repo: R) -> Router
where
    R: CustomerRepository + Clone + Send + Sync + 'static,
{
    let state = RecordAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/customer",
            get(handlers::find_customer::<R>).post(handlers::add_customer::<R>),
        )
        .route("/customers", get(handlers::list_customers::<R>))
        .route("/customer/{id}", delete(handlers::delete_customer::<R>))
        .with_state(state)
}

//! Records (Government Record Service) Backend Module
//!
//! Keyed store of customer loan records served over a JSON HTTP API. The
//! portal's loan gateway is its only production client.
//!
//! - `domain/` - Customer, loan status, repository trait
//! - `application/` - Lookup, add, list and delete use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - Handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use domain::{Customer, CustomerId, CustomerRepository, InsertOutcome, LoanStatus, NewCustomer};
pub use error::{RecordError, RecordResult};
pub use infra::{InMemoryCustomerRepository, PgCustomerRepository};
pub use presentation::{records_router, records_router_generic};

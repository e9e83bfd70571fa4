//! Loan (Validation Gateway) Backend Module
//!
//! Looks up the logged-in principal's loan record in the government record
//! service and renders it as an HTML fragment.
//!
//! - `domain/` - Loan record, lookup query, record client trait
//! - `application/` - Validation use case and gateway configuration
//! - `infra/` - `reqwest` record client
//! - `presentation/` - Handler, router, rendering

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::config::GatewayConfig;
pub use domain::{LoanOutcome, LoanRecord, RecordClient, RecordQuery};
pub use error::{LoanError, LoanResult};
pub use infra::HttpRecordClient;
pub use presentation::router::{loan_router, loan_router_generic};

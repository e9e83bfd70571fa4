//! Presentation Layer
//!
//! HTTP handler, router and HTML rendering.

pub mod handlers;
pub mod render;
pub mod router;

pub use handlers::LoanAppState;
pub use router::{loan_router, loan_router_generic};

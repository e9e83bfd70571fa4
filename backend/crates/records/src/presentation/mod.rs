//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{records_router, records_router_generic};

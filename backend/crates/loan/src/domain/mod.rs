//! Domain Layer

pub mod client;
pub mod record;

pub use client::{DownstreamResponse, RecordClient, TransportError};
pub use record::{LoanOutcome, LoanRecord, RecordQuery};

//! Application Layer

pub mod config;
pub mod validate_loan;

pub use config::GatewayConfig;
pub use validate_loan::{ValidateLoanInput, ValidateLoanUseCase};

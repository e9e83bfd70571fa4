//! Domain Layer

pub mod customer;
pub mod repository;

pub use customer::{Customer, CustomerId, LoanStatus, NewCustomer};
pub use repository::{CustomerRepository, InsertOutcome, LocalCustomerRepository};

//! Application Layer
//!
//! One use case per record service endpoint.

pub mod add_customer;
pub mod delete_customer;
pub mod find_customer;
pub mod list_customers;

pub use add_customer::{AddCustomerInput, AddCustomerUseCase};
pub use delete_customer::DeleteCustomerUseCase;
pub use find_customer::FindCustomerUseCase;
pub use list_customers::ListCustomersUseCase;

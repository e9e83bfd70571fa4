//! Repository Traits
//!
//! Name uniqueness is case-insensitive and enforced by the store, so two
//! concurrent inserts of one name pair cannot both succeed.

use crate::domain::customer::{Customer, CustomerId, NewCustomer};
use crate::error::RecordResult;

/// Result of [`CustomerRepository::insert_if_absent`]
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted(Customer),
    /// A customer with the same name pair already exists
    Exists(CustomerId),
}

/// Customer repository trait
#[trait_variant::make(CustomerRepository: Send)]
pub trait LocalCustomerRepository {
    /// Case-insensitive exact match on both names
    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RecordResult<Option<Customer>>;

    async fn insert_if_absent(&self, customer: &NewCustomer) -> RecordResult<InsertOutcome>;

    /// All customers, newest first
    async fn list(&self) -> RecordResult<Vec<Customer>>;

    /// Returns whether the customer existed
    async fn delete(&self, id: CustomerId) -> RecordResult<bool>;
}

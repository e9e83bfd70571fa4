//! In-Memory Repository Implementation
//!
//! Insert holds the write lock across its duplicate check, so name
//! uniqueness holds under concurrent inserts.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::customer::{Customer, CustomerId, NewCustomer};
use crate::domain::repository::{CustomerRepository, InsertOutcome};
use crate::error::RecordResult;

#[derive(Default)]
struct Table {
    rows: Vec<Customer>,
    last_id: CustomerId,
}

/// In-memory customer repository; clones share state
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RecordResult<Option<Customer>> {
        Ok(self
            .table
            .read()
            .rows
            .iter()
            .find(|c| c.has_name(first_name, last_name))
            .cloned())
    }

    async fn insert_if_absent(&self, customer: &NewCustomer) -> RecordResult<InsertOutcome> {
        let mut table = self.table.write();

        if let Some(existing) = table
            .rows
            .iter()
            .find(|c| c.has_name(customer.first_name(), customer.last_name()))
        {
            return Ok(InsertOutcome::Exists(existing.id));
        }

        table.last_id += 1;
        let stored = customer.clone().into_customer(table.last_id, Utc::now());
        table.rows.push(stored.clone());
        Ok(InsertOutcome::Inserted(stored))
    }

    async fn list(&self) -> RecordResult<Vec<Customer>> {
        let mut rows = self.table.read().rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn delete(&self, id: CustomerId) -> RecordResult<bool> {
        let mut table = self.table.write();
        let before = table.rows.len();
        table.rows.retain(|c| c.id != id);
        Ok(table.rows.len() != before)
    }
}

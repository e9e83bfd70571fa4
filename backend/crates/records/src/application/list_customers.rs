//! List Customers Use Case

use std::sync::Arc;

use crate::domain::customer::Customer;
use crate::domain::repository::CustomerRepository;
use crate::error::RecordResult;

pub struct ListCustomersUseCase<R>
where
    R: CustomerRepository,
{
    repo: Arc<R>,
}

impl<R> ListCustomersUseCase<R>
where
    R: CustomerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> RecordResult<Vec<Customer>> {
        self.repo.list().await
    }
}

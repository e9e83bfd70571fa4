//! Delete Customer Use Case

use std::sync::Arc;

use crate::domain::customer::CustomerId;
use crate::domain::repository::CustomerRepository;
use crate::error::{RecordError, RecordResult};

pub struct DeleteCustomerUseCase<R>
where
    R: CustomerRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteCustomerUseCase<R>
where
    R: CustomerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: CustomerId) -> RecordResult<()> {
        if !self.repo.delete(id).await? {
            return Err(RecordError::NotFound);
        }

        tracing::info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}

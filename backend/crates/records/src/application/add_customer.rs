//! Add Customer Use Case

use std::sync::Arc;

use crate::domain::customer::{CustomerId, NewCustomer};
use crate::domain::repository::{CustomerRepository, InsertOutcome};
use crate::error::{RecordError, RecordResult};

pub struct AddCustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub loan_amount_requested: f64,
    pub loan_status: String,
}

pub struct AddCustomerUseCase<R>
where
    R: CustomerRepository,
{
    repo: Arc<R>,
}

impl<R> AddCustomerUseCase<R>
where
    R: CustomerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: AddCustomerInput) -> RecordResult<CustomerId> {
        let customer = NewCustomer::new(
            &input.first_name,
            &input.last_name,
            &input.date_of_birth,
            input.loan_amount_requested,
            &input.loan_status,
        )?;

        match self.repo.insert_if_absent(&customer).await? {
            InsertOutcome::Inserted(stored) => {
                tracing::info!(
                    customer_id = stored.id,
                    loan_status = %stored.loan_status,
                    "Customer added"
                );
                Ok(stored.id)
            }
            InsertOutcome::Exists(existing_id) => Err(RecordError::AlreadyExists(existing_id)),
        }
    }
}

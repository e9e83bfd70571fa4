//! Find Customer Use Case

use std::sync::Arc;

use crate::domain::customer::Customer;
use crate::domain::repository::CustomerRepository;
use crate::error::{RecordError, RecordResult};

pub struct FindCustomerUseCase<R>
where
    R: CustomerRepository,
{
    repo: Arc<R>,
}

impl<R> FindCustomerUseCase<R>
where
    R: CustomerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Both names are required; missing or blank is a bad request
    pub async fn execute(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> RecordResult<Customer> {
        let (Some(first_name), Some(last_name)) = (non_blank(first_name), non_blank(last_name))
        else {
            return Err(RecordError::MissingName);
        };

        let customer = self
            .repo
            .find_by_name(first_name, last_name)
            .await?
            .ok_or(RecordError::NotFound)?;

        tracing::info!(
            customer_id = customer.id,
            loan_status = %customer.loan_status,
            "Customer record found"
        );
        Ok(customer)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::AddCustomerInput;
use crate::domain::customer::{Customer, CustomerId};

/// `GET /api/customer` query; presence is checked by the use case
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// `POST /api/customer` body
#[derive(Debug, Deserialize)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub loan_amount_requested: f64,
    pub loan_status: String,
}

impl From<CustomerInput> for AddCustomerInput {
    fn from(input: CustomerInput) -> Self {
        AddCustomerInput {
            first_name: input.first_name,
            last_name: input.last_name,
            date_of_birth: input.date_of_birth,
            loan_amount_requested: input.loan_amount_requested,
            loan_status: input.loan_status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerCreatedResponse {
    pub message: &'static str,
    pub customer_id: CustomerId,
}

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub count: usize,
    pub customers: Vec<Customer>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

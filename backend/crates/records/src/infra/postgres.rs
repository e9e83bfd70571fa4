//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::customer::{Customer, CustomerId, NewCustomer};
use crate::domain::repository::{CustomerRepository, InsertOutcome};
use crate::error::{RecordError, RecordResult};

/// PostgreSQL-backed customer repository
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for PgCustomerRepository {
    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RecordResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                date_of_birth,
                loan_amount_requested,
                loan_status,
                created_at
            FROM customers
            WHERE LOWER(first_name) = LOWER($1) AND LOWER(last_name) = LOWER($2)
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CustomerRow::into_customer).transpose()
    }

    async fn insert_if_absent(&self, customer: &NewCustomer) -> RecordResult<InsertOutcome> {
        // The unique index on (LOWER(first_name), LOWER(last_name)) decides races
        let inserted = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (
                first_name,
                last_name,
                date_of_birth,
                loan_amount_requested,
                loan_status
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT DO NOTHING
            RETURNING
                id,
                first_name,
                last_name,
                date_of_birth,
                loan_amount_requested,
                loan_status,
                created_at
            "#,
        )
        .bind(customer.first_name())
        .bind(customer.last_name())
        .bind(customer.date_of_birth())
        .bind(customer.loan_amount_requested())
        .bind(customer.loan_status().as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok(InsertOutcome::Inserted(row.into_customer()?));
        }

        let existing = self
            .find_by_name(customer.first_name(), customer.last_name())
            .await?
            .ok_or_else(|| RecordError::CorruptRow("insert conflicted without a match".into()))?;

        Ok(InsertOutcome::Exists(existing.id))
    }

    async fn list(&self) -> RecordResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                date_of_birth,
                loan_amount_requested,
                loan_status,
                created_at
            FROM customers
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        // Unreadable rows are skipped rather than failing the listing
        Ok(rows
            .into_iter()
            .filter_map(|row| match row.into_customer() {
                Ok(customer) => Some(customer),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable customer row");
                    None
                }
            })
            .collect())
    }

    async fn delete(&self, id: CustomerId) -> RecordResult<bool> {
        let deleted = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    date_of_birth: String,
    loan_amount_requested: f64,
    loan_status: String,
    created_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_customer(self) -> RecordResult<Customer> {
        let loan_status = self.loan_status.parse().map_err(|_| {
            RecordError::CorruptRow(format!(
                "customer {} has loan_status {:?}",
                self.id, self.loan_status
            ))
        })?;

        Ok(Customer {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            loan_amount_requested: self.loan_amount_requested,
            loan_status,
            created_at: self.created_at,
        })
    }
}

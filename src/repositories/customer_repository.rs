use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::customer_dto::CustomerRequest;
use crate::models::Customer;
use crate::utils::errors::AppError;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn create(&self, request: &CustomerRequest, now: DateTime<Utc>) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, name, company_name, phone, email, address, tax_code, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(&request.company_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.address)
        .bind(&request.tax_code)
        .bind(&request.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &CustomerRequest,
        now: DateTime<Utc>,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $2, company_name = $3, phone = $4, email = $5, address = $6,
                tax_code = $7, notes = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.trim())
        .bind(&request.company_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.address)
        .bind(&request.tax_code)
        .bind(&request.notes)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Devuelve `false` si no existía; un cliente con viajes o facturas da Conflict
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

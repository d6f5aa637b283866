//! Repository for the `employees` table.

use hours_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee, UpdateEmployee, DEFAULT_EMPLOYEE_ROLE};

const COLUMNS: &str = "id, name, email, home_state, home_country, role, hourly_rate";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert an employee. A duplicate e-mail violates `uq_employees_email`.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (name, email, home_state, home_country, role, hourly_rate)
             VALUES ($1, $2, $3, $4, COALESCE($5, $7), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.home_state)
            .bind(&input.home_country)
            .bind(&input.role)
            .bind(input.hourly_rate)
            .bind(DEFAULT_EMPLOYEE_ROLE)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive lookup by e-mail address.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, Employee>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Return the employee with `email`, creating one named `name` if none
    /// exists. Two concurrent first calls may race; the loser gets a
    /// unique-violation error.
    pub async fn get_or_create_by_email(
        pool: &PgPool,
        email: &str,
        name: &str,
    ) -> Result<Employee, sqlx::Error> {
        if let Some(existing) = Self::find_by_email(pool, email).await? {
            return Ok(existing);
        }

        let input = CreateEmployee {
            name: name.to_string(),
            email: email.to_string(),
            home_state: None,
            home_country: None,
            role: None,
            hourly_rate: None,
        };
        let employee = Self::create(pool, &input).await?;
        tracing::info!(employee_id = employee.id, email, "Provisioned employee");
        Ok(employee)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY name, id");
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Apply a sparse update under a row lock. Returns `None` if the employee
    /// does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1 FOR UPDATE");
        let Some(mut employee) = sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        employee.merge(input);

        let query = format!(
            "UPDATE employees SET
                name = $2, email = $3, home_state = $4, home_country = $5,
                role = $6, hourly_rate = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let employee = sqlx::query_as::<_, Employee>(&query)
            .bind(employee.id)
            .bind(&employee.name)
            .bind(&employee.email)
            .bind(&employee.home_state)
            .bind(&employee.home_country)
            .bind(&employee.role)
            .bind(employee.hourly_rate)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(employee))
    }

    /// Delete an employee. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

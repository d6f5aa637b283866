//! Repository for the `assigned_projects` table.

use hours_core::types::DbId;
use sqlx::PgPool;

use crate::models::assigned_project::{
    AssignedProject, AssignmentDetail, AssignmentFilter, AssignmentItem, CreateAssignedProject,
};

const COLUMNS: &str = "id, employee_id, project_id, client_id, active";

/// Provides operations on an employee's set of project assignments.
pub struct AssignedProjectRepo;

impl AssignedProjectRepo {
    /// Replace every assignment of `employee_id` with `items`.
    ///
    /// Deletes all existing rows for the employee and inserts one active row
    /// per item, in one transaction. An empty `items` clears the set. If any
    /// insert fails the deletion is rolled back too. Returns the new rows in
    /// input order.
    pub async fn bulk_replace(
        pool: &PgPool,
        employee_id: DbId,
        items: &[AssignmentItem],
    ) -> Result<Vec<AssignedProject>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM assigned_projects WHERE employee_id = $1")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let query = format!(
            "INSERT INTO assigned_projects (employee_id, project_id, client_id, active)
             VALUES ($1, $2, $3, true)
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, AssignedProject>(&query)
                .bind(employee_id)
                .bind(item.project_id)
                .bind(item.client_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        tracing::debug!(employee_id, removed, inserted = created.len(), "Replaced assignments");
        Ok(created)
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateAssignedProject,
    ) -> Result<AssignedProject, sqlx::Error> {
        let query = format!(
            "INSERT INTO assigned_projects (employee_id, project_id, client_id, active)
             VALUES ($1, $2, $3, COALESCE($4, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignedProject>(&query)
            .bind(input.employee_id)
            .bind(input.project_id)
            .bind(input.client_id)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AssignedProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assigned_projects WHERE id = $1");
        sqlx::query_as::<_, AssignedProject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List assignments, optionally restricted to one employee, by id.
    pub async fn list(
        pool: &PgPool,
        filter: &AssignmentFilter,
    ) -> Result<Vec<AssignedProject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assigned_projects
             WHERE ($1::BIGINT IS NULL OR employee_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, AssignedProject>(&query)
            .bind(filter.employee_id)
            .fetch_all(pool)
            .await
    }

    /// An employee's assignments with project and client names.
    pub async fn list_with_details(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<AssignmentDetail>, sqlx::Error> {
        sqlx::query_as::<_, AssignmentDetail>(
            "SELECT ap.id, ap.employee_id, ap.project_id, p.name AS project_name,
                    ap.client_id, c.name AS client_name, ap.active
             FROM assigned_projects ap
             JOIN projects p ON p.id = ap.project_id
             JOIN clients c ON c.secondary_id = ap.client_id
             WHERE ap.employee_id = $1
             ORDER BY ap.id",
        )
        .bind(employee_id)
        .fetch_all(pool)
        .await
    }

    /// Delete one assignment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assigned_projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

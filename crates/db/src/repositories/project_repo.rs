//! Repository for the `projects` table.

use hours_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::repositories::filter::{BindValue, Conditions};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, name, billable_default, hourly_rate, active";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (client_id, name, billable_default, hourly_rate, active)
             VALUES ($1, $2, COALESCE($3, true), $4, COALESCE($5, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(input.billable_default)
            .bind(input.hourly_rate)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching every supplied filter, by id.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let mut conditions = Conditions::new();
        conditions.eq("client_id", filter.client_id, BindValue::Uuid);
        conditions.eq("active", filter.active, BindValue::Bool);

        let query = format!(
            "SELECT {COLUMNS} FROM projects {} ORDER BY id",
            conditions.where_clause()
        );
        conditions
            .bind(sqlx::query_as::<_, Project>(&query))
            .fetch_all(pool)
            .await
    }

    /// Apply a sparse update under a row lock. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        let Some(mut project) = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        project.merge(input);

        let query = format!(
            "UPDATE projects SET
                client_id = $2, name = $3, billable_default = $4, hourly_rate = $5, active = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(project.client_id)
            .bind(&project.name)
            .bind(project.billable_default)
            .bind(project.hourly_rate)
            .bind(project.active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

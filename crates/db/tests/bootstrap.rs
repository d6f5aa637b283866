use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    hours_db::health_check(&pool).await.unwrap();

    let tables = [
        "app_users",
        "employees",
        "clients",
        "projects",
        "weeks",
        "time_entries",
        "assigned_projects",
        "invoices",
        "invoice_lines",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Unique constraints must be named `uq_*` so the API maps them to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_follow_naming_convention(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::text FROM pg_constraint
         WHERE contype = 'u' AND connamespace = 'public'::regnamespace
         ORDER BY conname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in &names {
        assert!(name.starts_with("uq_"), "Unique constraint {name} should start with uq_");
    }
}

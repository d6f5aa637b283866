//! Integration tests for the week ledger.

mod common;

use assert_matches::assert_matches;
use common::{date, new_entry, seed};
use hours_db::models::week::{CreateWeek, UpdateWeek, WeekFilter};
use hours_db::repositories::{TimeEntryRepo, WeekRepo};
use sqlx::PgPool;

async fn week_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM weeks")
        .fetch_one(pool)
        .await
        .unwrap()
}

fn create_week(week_start: chrono::NaiveDate) -> CreateWeek {
    CreateWeek {
        week_start,
        week_end: None,
        week_number: None,
        year_number: None,
        is_split_month: None,
        month_a_key: None,
        month_b_key: None,
        qty_days_a: None,
        qty_days_b: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ensure_week_is_idempotent(pool: PgPool) {
    let first = WeekRepo::ensure(&pool, date(2026, 1, 5)).await.unwrap();
    let second = WeekRepo::ensure(&pool, date(2026, 1, 5)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(week_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ensure_week_derives_iso_fields(pool: PgPool) {
    let week = WeekRepo::ensure(&pool, date(2026, 1, 5)).await.unwrap();

    assert_eq!(week.week_end, date(2026, 1, 11));
    assert_eq!(week.week_number, 2);
    assert_eq!(week.year_number, 2026);
    assert!(!week.is_split_month);
    assert_eq!(week.month_a_key, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ensure_week_never_overwrites_existing_row(pool: PgPool) {
    let mut input = create_week(date(2026, 3, 30));
    input.is_split_month = Some(true);
    input.qty_days_a = Some(2);
    input.qty_days_b = Some(5);
    WeekRepo::create(&pool, &input.resolve()).await.unwrap();

    let week = WeekRepo::ensure(&pool, date(2026, 3, 30)).await.unwrap();

    assert!(week.is_split_month);
    assert_eq!(week.qty_days_a, Some(2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ensure_exists_reports_whether_it_inserted(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    assert!(WeekRepo::ensure_exists(&mut *tx, date(2026, 2, 2)).await.unwrap());
    assert!(!WeekRepo::ensure_exists(&mut *tx, date(2026, 2, 2)).await.unwrap());
    tx.rollback().await.unwrap();

    assert_eq!(week_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_explicit_week_is_pk_violation(pool: PgPool) {
    let week = create_week(date(2026, 1, 5)).resolve();
    WeekRepo::create(&pool, &week).await.unwrap();

    let err = WeekRepo::create(&pool, &week).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23505"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_weeks_filters_conjunctively(pool: PgPool) {
    WeekRepo::ensure(&pool, date(2026, 1, 5)).await.unwrap();
    WeekRepo::ensure(&pool, date(2026, 1, 12)).await.unwrap();
    let mut split = create_week(date(2026, 3, 30));
    split.is_split_month = Some(true);
    WeekRepo::create(&pool, &split.resolve()).await.unwrap();

    let all = WeekRepo::list(&pool, &WeekFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].week_start, date(2026, 1, 5));

    let filter = WeekFilter {
        year_number: Some(2026),
        week_number: Some(3),
        is_split_month: None,
    };
    let weeks = WeekRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].week_start, date(2026, 1, 12));

    let filter = WeekFilter {
        is_split_month: Some(true),
        ..Default::default()
    };
    let weeks = WeekRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].week_start, date(2026, 3, 30));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_week_is_sparse(pool: PgPool) {
    WeekRepo::ensure(&pool, date(2026, 3, 30)).await.unwrap();

    let patch = UpdateWeek {
        is_split_month: Some(true),
        month_a_key: Some(Some(3)),
        month_b_key: Some(Some(4)),
        ..Default::default()
    };
    let week = WeekRepo::update(&pool, date(2026, 3, 30), &patch)
        .await
        .unwrap()
        .unwrap();

    assert!(week.is_split_month);
    assert_eq!(week.month_a_key, Some(3));
    assert_eq!(week.week_end, date(2026, 4, 5));
    assert_eq!(week.week_number, 14);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_week_returns_none(pool: PgPool) {
    let result = WeekRepo::update(&pool, date(2030, 1, 7), &UpdateWeek::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_week_referenced_by_entry_fails(pool: PgPool) {
    let f = seed(&pool).await;
    TimeEntryRepo::create(&pool, &new_entry(&f, date(2026, 1, 5), "8"))
        .await
        .unwrap();

    let err = WeekRepo::delete(&pool, date(2026, 1, 5)).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503"));

    WeekRepo::ensure(&pool, date(2026, 2, 2)).await.unwrap();
    assert!(WeekRepo::delete(&pool, date(2026, 2, 2)).await.unwrap());
    assert!(!WeekRepo::delete(&pool, date(2026, 2, 2)).await.unwrap());
}

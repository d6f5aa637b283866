//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use std::str::FromStr;

use chrono::NaiveDate;
use hours_db::models::client::{Client, CreateClient};
use hours_db::models::employee::{CreateEmployee, Employee};
use hours_db::models::project::{CreateProject, Project};
use hours_db::models::time_entry::CreateTimeEntry;
use hours_db::repositories::{ClientRepo, EmployeeRepo, ProjectRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub async fn seed_client(pool: &PgPool, name: &str) -> Client {
    ClientRepo::create(
        pool,
        &CreateClient {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub async fn seed_project(pool: &PgPool, client_id: Uuid, name: &str) -> Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            client_id,
            name: name.to_string(),
            billable_default: None,
            hourly_rate: None,
            active: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_employee(pool: &PgPool, email: &str) -> Employee {
    EmployeeRepo::create(
        pool,
        &CreateEmployee {
            name: email.split('@').next().unwrap().to_string(),
            email: email.to_string(),
            home_state: None,
            home_country: None,
            role: None,
            hourly_rate: None,
        },
    )
    .await
    .unwrap()
}

/// A client, one project under it, and one employee.
pub struct Fixture {
    pub client: Client,
    pub project: Project,
    pub employee: Employee,
}

pub async fn seed(pool: &PgPool) -> Fixture {
    let client = seed_client(pool, "Contoso").await;
    let project = seed_project(pool, client.secondary_id, "Migration").await;
    let employee = seed_employee(pool, "ana@contoso.com").await;
    Fixture {
        client,
        project,
        employee,
    }
}

pub fn new_entry(f: &Fixture, week_start: NaiveDate, hours: &str) -> CreateTimeEntry {
    CreateTimeEntry {
        employee_id: f.employee.id,
        project_id: f.project.id,
        client_id: f.client.secondary_id,
        week_start,
        total_hours: dec(hours),
        billable: None,
        location_type: "remote".to_string(),
        location_value: None,
        is_split_month: None,
        month_a_hours: None,
        month_b_hours: None,
    }
}

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Helpers that must join the
//! caller's transaction take `&mut PgConnection` instead.

mod filter;

pub mod app_user_repo;
pub mod assigned_project_repo;
pub mod client_repo;
pub mod employee_repo;
pub mod invoice_line_repo;
pub mod invoice_repo;
pub mod project_repo;
pub mod time_entry_repo;
pub mod week_repo;

pub use app_user_repo::AppUserRepo;
pub use assigned_project_repo::AssignedProjectRepo;
pub use client_repo::ClientRepo;
pub use employee_repo::EmployeeRepo;
pub use invoice_line_repo::InvoiceLineRepo;
pub use invoice_repo::InvoiceRepo;
pub use project_repo::ProjectRepo;
pub use time_entry_repo::TimeEntryRepo;
pub use week_repo::WeekRepo;

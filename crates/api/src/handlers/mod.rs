pub mod assigned_projects;
pub mod auth;
pub mod clients;
pub mod employees;
pub mod invoice_lines;
pub mod invoices;
pub mod projects;
pub mod time_entries;
pub mod weeks;

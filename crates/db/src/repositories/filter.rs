//! Dynamic `WHERE` clause construction for list filters.

use chrono::NaiveDate;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;
use uuid::Uuid;

/// A typed value bound to a numbered placeholder.
#[derive(Debug, Clone)]
pub(crate) enum BindValue {
    BigInt(i64),
    Int(i32),
    Bool(bool),
    Uuid(Uuid),
    Date(NaiveDate),
    Text(String),
}

/// Conjunction of `column <op> $n` conditions with their bind values.
#[derive(Debug, Default)]
pub(crate) struct Conditions {
    clauses: Vec<String>,
    binds: Vec<BindValue>,
}

impl Conditions {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add `column op $n` when `value` is present.
    pub(crate) fn push<T>(&mut self, column: &str, op: &str, value: Option<T>, wrap: fn(T) -> BindValue) {
        if let Some(value) = value {
            let idx = self.binds.len() + 1;
            self.clauses.push(format!("{column} {op} ${idx}"));
            self.binds.push(wrap(value));
        }
    }

    /// Add `column = $n` when `value` is present.
    pub(crate) fn eq<T>(&mut self, column: &str, value: Option<T>, wrap: fn(T) -> BindValue) {
        self.push(column, "=", value, wrap);
    }

    /// `WHERE a AND b ...`, or an empty string when nothing was added.
    pub(crate) fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Bind every collected value, in placeholder order.
    pub(crate) fn bind<'q, O>(
        &'q self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for val in &self.binds {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Int(v) => q = q.bind(*v),
                BindValue::Bool(v) => q = q.bind(*v),
                BindValue::Uuid(v) => q = q.bind(*v),
                BindValue::Date(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
            }
        }
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_conditions_yields_empty_clause() {
        let conditions = Conditions::new();
        assert_eq!(conditions.where_clause(), "");
    }

    #[test]
    fn absent_values_are_skipped_and_placeholders_stay_dense() {
        let mut conditions = Conditions::new();
        conditions.eq("employee_id", Some(3_i64), BindValue::BigInt);
        conditions.eq("project_id", None::<i64>, BindValue::BigInt);
        conditions.push(
            "week_start",
            ">=",
            NaiveDate::from_ymd_opt(2026, 1, 5),
            BindValue::Date,
        );
        assert_eq!(
            conditions.where_clause(),
            "WHERE employee_id = $1 AND week_start >= $2"
        );
        assert_eq!(conditions.binds.len(), 2);
    }
}

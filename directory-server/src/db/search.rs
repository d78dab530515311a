//! Employee search query builder
//!
//! Turns a normalized [`EmployeeSearch`] into SurrealQL. Field names come
//! from the fixed [`SearchField`] whitelist; user text is only ever bound as
//! `$term`, and the circle reference as `$circle`.

use shared::models::{EmployeeSearch, SearchField};
use surrealdb::RecordId;

use super::models::EMPLOYEE_TABLE;

/// Resolved `my_circle` restriction
#[derive(Debug, Clone, PartialEq)]
pub enum CircleScope {
    /// Subject has a manager: everyone reporting to it (subject included)
    Peers(RecordId),
    /// Subject is top-level: the subject alone
    Only(RecordId),
}

impl CircleScope {
    /// Circle of an employee given its own id and manager
    pub fn of(id: RecordId, reports_to: Option<RecordId>) -> Self {
        match reports_to {
            Some(manager) => CircleScope::Peers(manager),
            None => CircleScope::Only(id),
        }
    }

    /// Record bound as `$circle`
    pub fn binding(&self) -> RecordId {
        match self {
            CircleScope::Peers(id) | CircleScope::Only(id) => id.clone(),
        }
    }

    fn condition(&self) -> &'static str {
        match self {
            CircleScope::Peers(_) => "reports_to = $circle",
            CircleScope::Only(_) => "id = $circle",
        }
    }
}

/// A ready-to-run search: page query plus count query sharing one WHERE clause
#[derive(Debug, Clone)]
pub struct SearchPlan {
    condition: String,
    /// Bound as `$term` when present
    pub term: Option<String>,
    /// Bound as `$circle` when present
    pub scope: Option<CircleScope>,
    limit: u32,
    start: u64,
}

impl SearchPlan {
    pub fn new(search: &EmployeeSearch, scope: Option<CircleScope>) -> Self {
        let mut clauses: Vec<String> = Vec::with_capacity(2);

        if search.term.is_some() {
            clauses.push(term_clause(&search.fields));
        }
        if let Some(scope) = &scope {
            clauses.push(scope.condition().to_string());
        }

        let condition = if clauses.is_empty() {
            "true".to_string()
        } else {
            clauses.join(" AND ")
        };

        Self {
            condition,
            term: search.term.clone(),
            scope,
            limit: search.rows_per_page,
            start: search.skip(),
        }
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Statement 0 of the search query: one ordered page
    pub fn page_sql(&self) -> String {
        format!(
            "SELECT * FROM {table} WHERE {cond} ORDER BY name ASC, id ASC LIMIT {limit} START {start}",
            table = EMPLOYEE_TABLE,
            cond = self.condition,
            limit = self.limit,
            start = self.start,
        )
    }

    /// Statement 1 of the search query: total matches, ignoring the page
    pub fn count_sql(&self) -> String {
        format!(
            "SELECT count() AS total FROM {table} WHERE {cond} GROUP ALL",
            table = EMPLOYEE_TABLE,
            cond = self.condition,
        )
    }

    /// Both statements, page first
    pub fn sql(&self) -> String {
        format!("{};\n{};", self.page_sql(), self.count_sql())
    }
}

/// Case-insensitive substring match of `$term` over the selected fields.
/// `$term` is already lowercased; optional fields coalesce to ''.
fn term_clause(fields: &[SearchField]) -> String {
    let parts: Vec<String> = fields
        .iter()
        .map(|f| {
            format!(
                "string::contains(string::lowercase({} ?? ''), $term)",
                f.as_str()
            )
        })
        .collect();
    format!("({})", parts.join(" OR "))
}

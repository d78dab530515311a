//! Employee search query types
//!
//! [`SearchQuery`] is the raw query string of `GET /employees/search`;
//! [`EmployeeSearch`] is its normalized form consumed by the repository.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_ROWS_PER_PAGE: u32 = 20;
pub const MAX_ROWS_PER_PAGE: u32 = 100;

/// Raw search query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search_term: Option<String>,
    /// 1-based; signed so that `page=-1` parses and is clamped
    pub page: Option<i64>,
    pub rows_per_page: Option<i64>,
    /// Comma-separated field group, e.g. `name,email` or `all`
    pub group: Option<String>,
    /// Only `my_circle` is recognised
    pub filter: Option<String>,
    /// Subject of the `my_circle` filter
    pub employee_id: Option<String>,
}

/// Text fields a search term can be matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Name,
    Description,
    Email,
    Phone,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Name,
        SearchField::Description,
        SearchField::Email,
        SearchField::Phone,
    ];

    /// Stored field name
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Description => "description",
            SearchField::Email => "email",
            SearchField::Phone => "phone",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SearchField::Name),
            "description" => Some(SearchField::Description),
            "email" => Some(SearchField::Email),
            "phone" => Some(SearchField::Phone),
            _ => None,
        }
    }

    /// Parse a comma-separated group. Empty or `all` selects every field.
    pub fn parse_group(group: Option<&str>) -> Result<Vec<SearchField>, AppError> {
        let group = group.map(str::trim).unwrap_or_default();
        if group.is_empty() || group.eq_ignore_ascii_case("all") {
            return Ok(Self::ALL.to_vec());
        }

        let mut fields = Vec::new();
        for part in group.split(',').map(|p| p.trim().to_ascii_lowercase()) {
            if part.is_empty() {
                continue;
            }
            let field = Self::parse(&part).ok_or_else(|| {
                AppError::validation(format!("Unknown search group field: {}", part))
                    .with_detail("group", group.to_string())
            })?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }

        if fields.is_empty() {
            return Ok(Self::ALL.to_vec());
        }
        Ok(fields)
    }
}

/// Normalized search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSearch {
    /// Lowercased, trimmed; `None` matches everything
    pub term: Option<String>,
    pub fields: Vec<SearchField>,
    /// 1-based
    pub page: u32,
    pub rows_per_page: u32,
    /// Subject id when restricted to its circle
    pub circle_of: Option<String>,
}

impl EmployeeSearch {
    /// Number of matches to skip before the current page
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.rows_per_page)
    }
}

impl TryFrom<SearchQuery> for EmployeeSearch {
    type Error = AppError;

    fn try_from(query: SearchQuery) -> Result<Self, Self::Error> {
        let term = query
            .search_term
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());

        let fields = SearchField::parse_group(query.group.as_deref())?;

        let page = query
            .page
            .map_or(1, |p| u32::try_from(p.max(1)).unwrap_or(u32::MAX));
        let rows_per_page = query.rows_per_page.map_or(DEFAULT_ROWS_PER_PAGE, |r| {
            r.clamp(1, i64::from(MAX_ROWS_PER_PAGE)) as u32
        });

        let circle_of = match query.filter.as_deref().map(str::trim) {
            None | Some("") => None,
            Some("my_circle") => {
                let id = query
                    .employee_id
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| {
                        AppError::validation("employeeId is required for the my_circle filter")
                    })?;
                Some(id)
            }
            Some(other) => {
                return Err(AppError::validation(format!("Unknown filter: {}", other))
                    .with_detail("filter", other.to_string()));
            }
        };

        Ok(Self {
            term,
            fields,
            page,
            rows_per_page,
            circle_of,
        })
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
    /// Full match count, independent of the page
    pub total_results: u64,
    pub page: u32,
    pub rows_per_page: u32,
    pub total_pages: u64,
}

impl<T> SearchResponse<T> {
    pub fn new(results: Vec<T>, total_results: u64, page: u32, rows_per_page: u32) -> Self {
        let total_pages = if rows_per_page > 0 {
            total_results.div_ceil(u64::from(rows_per_page))
        } else {
            1
        };

        Self {
            results,
            total_results,
            page,
            rows_per_page,
            total_pages,
        }
    }
}

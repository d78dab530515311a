//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::Database;
use crate::db::models::{EMPLOYEE_TABLE, Employee, EmployeeId, EmployeeName};
use crate::db::search::{CircleScope, SearchPlan};
use shared::models::{EmployeeCreate, EmployeeSearch, EmployeeUpdate};
use shared::util::now_millis;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

/// One page of matches plus the total count
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub employees: Vec<Employee>,
    pub total: u64,
}

impl EmployeeRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Parse an API id (`employee:<key>` or `<key>`)
    pub fn parse_id(id: &str) -> RepoResult<EmployeeId> {
        parse_record_id(EMPLOYEE_TABLE, id)
    }

    fn parse_manager(reports_to: Option<String>) -> RepoResult<Option<EmployeeId>> {
        reports_to
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|s| Self::parse_id(&s))
            .transpose()
    }

    /// Find all employees, ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY name ASC, id ASC")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Id + name of every employee, ordered by name
    pub async fn find_all_names(&self) -> RepoResult<Vec<EmployeeName>> {
        let names: Vec<EmployeeName> = self
            .base
            .db()
            .query("SELECT id, name FROM employee ORDER BY name ASC, id ASC")
            .await?
            .take(0)?;
        Ok(names)
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let thing = Self::parse_id(id)?;
        self.find_by_record(thing).await
    }

    async fn find_by_record(&self, thing: EmployeeId) -> RepoResult<Option<Employee>> {
        let emp: Option<Employee> = self.base.db().select(thing).await?;
        Ok(emp)
    }

    /// Find employee by id, failing with [`RepoError::NotFound`]
    pub async fn get(&self, id: &str) -> RepoResult<Employee> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    /// Resolve the manager of an employee, `None` if absent or dangling
    pub async fn find_manager(&self, employee: &Employee) -> RepoResult<Option<Employee>> {
        match &employee.reports_to {
            Some(manager) => self.find_by_record(manager.clone()).await,
            None => Ok(None),
        }
    }

    /// Find employee by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Create a new employee
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let email = data.email.trim().to_string();

        // Check duplicate email; the unique index still arbitrates races
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                email
            )));
        }

        let reports_to = Self::parse_manager(data.reports_to)?;
        let now = now_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    name = $name,
                    description = $description,
                    email = $email,
                    phone = $phone,
                    reports_to = $reports_to,
                    image = $image,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name.trim().to_string()))
            .bind(("description", data.description))
            .bind(("email", email))
            .bind(("phone", data.phone))
            .bind(("reports_to", reports_to))
            .bind(("image", data.image))
            .bind(("now", now))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))?;
        tracing::info!(employee_id = %created.id, "Employee created");
        Ok(created)
    }

    /// Replace the mutable fields of an employee
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let thing = Self::parse_id(id)?;
        let existing = self
            .find_by_record(thing.clone())
            .await?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;

        let reports_to = Self::parse_manager(data.reports_to)?;
        if reports_to.as_ref() == Some(&existing.id) {
            return Err(RepoError::Validation(
                "Employee cannot report to itself".to_string(),
            ));
        }

        // Check duplicate email if changing
        let email = data.email.trim().to_string();
        if email != existing.email
            && let Some(other) = self.find_by_email(&email).await?
            && other.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                email
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name,
                    description = $description,
                    email = $email,
                    phone = $phone,
                    reports_to = $reports_to,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name.trim().to_string()))
            .bind(("description", data.description))
            .bind(("email", email))
            .bind(("phone", data.phone))
            .bind(("reports_to", reports_to))
            .bind(("now", now_millis()))
            .await?;

        let updated = result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        tracing::info!(employee_id = %updated.id, "Employee updated");
        Ok(updated)
    }

    /// Hard delete an employee, returning the removed record
    pub async fn delete(&self, id: &str) -> RepoResult<Employee> {
        let thing = Self::parse_id(id)?;

        let mut result = self
            .base
            .db()
            .query("DELETE $thing RETURN BEFORE")
            .bind(("thing", thing))
            .await?;

        let deleted = result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        tracing::info!(employee_id = %deleted.id, "Employee deleted");
        Ok(deleted)
    }

    /// Resolve the `my_circle` scope for an employee id
    pub async fn circle_of(&self, id: &str) -> RepoResult<CircleScope> {
        let subject = self.get(id).await?;
        Ok(CircleScope::of(subject.id, subject.reports_to))
    }

    /// Search with pagination
    pub async fn search(&self, search: &EmployeeSearch) -> RepoResult<SearchPage> {
        let scope = match &search.circle_of {
            Some(id) => Some(self.circle_of(id).await?),
            None => None,
        };
        let plan = SearchPlan::new(search, scope);

        let mut query = self.base.db().query(plan.sql());
        if let Some(term) = &plan.term {
            query = query.bind(("term", term.clone()));
        }
        if let Some(scope) = &plan.scope {
            query = query.bind(("circle", scope.binding()));
        }

        let mut result = query.await?;
        let employees: Vec<Employee> = result.take(0)?;
        let total: Option<u64> = result.take((1, "total"))?;

        Ok(SearchPage {
            employees,
            total: total.unwrap_or(0),
        })
    }
}

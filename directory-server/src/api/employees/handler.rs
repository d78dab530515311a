//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::extract::{ApiQuery, ValidatedJson};
use crate::core::ServerState;
use crate::db::repository::EmployeeRepository;
use crate::services::hierarchy::build_forest;
use crate::utils::AppResult;
use shared::models::{
    EmployeeCreate, EmployeeDetail, EmployeeNode, EmployeeResponse, EmployeeSearch,
    EmployeeSummary, EmployeeUpdate, SearchQuery, SearchResponse,
};

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// Id + name of every employee
pub async fn list_simple(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<EmployeeSummary>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let names = repo.find_all_names().await?;
    Ok(Json(names.into_iter().map(Into::into).collect()))
}

/// Reporting forest
pub async fn hierarchy(State(state): State<ServerState>) -> AppResult<Json<Vec<EmployeeNode>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employees: Vec<EmployeeResponse> = repo
        .find_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(build_forest(employees)))
}

/// Paginated search
pub async fn search(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<SearchResponse<EmployeeResponse>>> {
    let search = EmployeeSearch::try_from(query)?;
    let repo = EmployeeRepository::new(state.db.clone());
    let page = repo.search(&search).await?;

    Ok(Json(SearchResponse::new(
        page.employees.into_iter().map(Into::into).collect(),
        page.total,
        search.page,
        search.rows_per_page,
    )))
}

/// Get employee by id, with its manager resolved
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeDetail>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.get(&id).await?;
    let manager = repo.find_manager(&employee).await?;

    Ok(Json(EmployeeDetail {
        employee: employee.into(),
        manager: manager.map(Into::into),
    }))
}

/// Replace the mutable fields of an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<EmployeeUpdate>,
) -> AppResult<Json<EmployeeResponse>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.update(&id, payload).await?;
    Ok(Json(employee.into()))
}

/// Hard delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeResponse>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.delete(&id).await?;
    Ok(Json(employee.into()))
}

//! Handlers for `/org-units` and `/people`.

use auditdesk_core::audit;
use auditdesk_core::types::DbId;
use auditdesk_db::models::org_unit::{CreateOrgUnit, OrgUnit};
use auditdesk_db::models::person::{CreatePerson, Person};
use auditdesk_db::repositories::{OrgUnitRepo, PersonRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::query::OrgUnitFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/org-units
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<OrgUnit>>>> {
    let units = OrgUnitRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: units }))
}

/// POST /api/v1/org-units
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrgUnit>,
) -> AppResult<(StatusCode, Json<OrgUnit>)> {
    audit::validate_title("name", &input.name).map_err(AppError::BadRequest)?;
    audit::validate_title("code", &input.code).map_err(AppError::BadRequest)?;
    let unit = OrgUnitRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

/// GET /api/v1/org-units/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrgUnit>> {
    let unit = OrgUnitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("OrgUnit", id))?;
    Ok(Json(unit))
}

/// GET /api/v1/people?org_unit_id=
pub async fn list_people(
    State(state): State<AppState>,
    Query(filter): Query<OrgUnitFilter>,
) -> AppResult<Json<DataResponse<Vec<Person>>>> {
    let people = PersonRepo::list(&state.pool, filter.org_unit_id).await?;
    Ok(Json(DataResponse { data: people }))
}

/// POST /api/v1/people
pub async fn create_person(
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<Person>)> {
    audit::validate_title("full_name", &input.full_name).map_err(AppError::BadRequest)?;
    if !input.email.contains('@') {
        return Err(AppError::BadRequest(format!(
            "Invalid email address '{}'",
            input.email
        )));
    }
    let person = PersonRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cmdb_common::SoftwareType;
use sea_orm::*;
use tracing::instrument;

use crate::entity::software;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::{fetch_page, parse_sub_type};
use crate::models::shared::page_bounds;
use crate::models::software::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Software",
    operation_id = "createSoftware",
    summary = "Register a licensed software product",
    description = "Creates a software catalog entry. The version string must be unique. `sub_asset_type` defaults to `operating_system` and `license_num` to 1.",
    request_body = CreateSoftwareRequest,
    responses(
        (status = 201, description = "Software created", body = SoftwareResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Version already registered (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(version = %payload.version))]
pub async fn create_software(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSoftwareRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_software(&payload)?;

    let new_software = software::ActiveModel {
        sub_asset_type: Set(payload.sub_asset_type.unwrap_or_default()),
        license_num: Set(payload.license_num.unwrap_or(1)),
        version: Set(payload.version.trim().to_string()),
        ..Default::default()
    };
    let model = new_software.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(SoftwareResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Software",
    operation_id = "listSoftware",
    summary = "List software",
    description = "Returns a paginated list of software ordered by version. `sub_asset_type` filters by category key.",
    params(SoftwareListQuery),
    responses(
        (status = 200, description = "List of software", body = SoftwareListResponse),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_software(
    State(state): State<AppState>,
    Query(query): Query<SoftwareListQuery>,
) -> Result<Json<SoftwareListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;

    let mut select = software::Entity::find();
    if let Some(sub_type) = parse_sub_type::<SoftwareType>(query.sub_asset_type.as_deref())? {
        select = select.filter(software::Column::SubAssetType.eq(sub_type));
    }
    let select = select.order_by_asc(software::Column::Version);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;

    Ok(Json(SoftwareListResponse {
        data: models.into_iter().map(SoftwareResponse::from).collect(),
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Software",
    operation_id = "getSoftware",
    summary = "Get software by ID",
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 200, description = "Software details", body = SoftwareResponse),
        (status = 404, description = "Software not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_software(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SoftwareResponse>, AppError> {
    let model = find_software(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Software",
    operation_id = "updateSoftware",
    summary = "Update software",
    params(("id" = i32, Path, description = "Software ID")),
    request_body = UpdateSoftwareRequest,
    responses(
        (status = 200, description = "Software updated", body = SoftwareResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Software not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Version already registered (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_software(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSoftwareRequest>,
) -> Result<Json<SoftwareResponse>, AppError> {
    validate_update_software(&payload)?;

    let existing = find_software(&state.db, id).await?;
    if payload == UpdateSoftwareRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: software::ActiveModel = existing.into();
    if let Some(sub_type) = payload.sub_asset_type {
        active.sub_asset_type = Set(sub_type);
    }
    if let Some(n) = payload.license_num {
        active.license_num = Set(n);
    }
    if let Some(ref version) = payload.version {
        active.version = Set(version.trim().to_string());
    }

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Software",
    operation_id = "deleteSoftware",
    summary = "Delete software by ID",
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 204, description = "Software deleted"),
        (status = 404, description = "Software not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_software(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = software::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Software not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_software<C: ConnectionTrait>(db: &C, id: i32) -> Result<software::Model, AppError> {
    software::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Software not found".into()))
}

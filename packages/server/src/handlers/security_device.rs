use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cmdb_common::SecurityDeviceType;
use sea_orm::*;
use tracing::instrument;

use crate::entity::security_device;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::{assets_by_id, fetch_page, find_asset, parse_sub_type, require_asset};
use crate::models::device::*;
use crate::models::shared::page_bounds;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Security Devices",
    operation_id = "createSecurityDevice",
    summary = "Attach security device details to an asset",
    description = "Creates the security device sub-record of an asset. Each asset has at most one. `sub_asset_type` defaults to `firewall` and `model` to `未知型号`.",
    request_body = CreateSecurityDeviceRequest,
    responses(
        (status = 201, description = "Security device created", body = SecurityDeviceResponse),
        (status = 400, description = "Validation error or unknown asset (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Asset already has a security device record (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(asset_id = payload.asset_id))]
pub async fn create_security_device(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSecurityDeviceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_model(payload.model.as_deref())?;

    let asset = require_asset(&state.db, payload.asset_id).await?;

    let new_device = security_device::ActiveModel {
        asset_id: Set(payload.asset_id),
        sub_asset_type: Set(payload.sub_asset_type.unwrap_or_default()),
        model: Set(model_or_default(payload.model, security_device::DEFAULT_MODEL)),
        ..Default::default()
    };
    let model = new_device.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(SecurityDeviceResponse::new(model, &asset)),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Security Devices",
    operation_id = "listSecurityDevices",
    summary = "List security devices",
    params(DeviceListQuery),
    responses(
        (status = 200, description = "List of security devices", body = SecurityDeviceListResponse),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_security_devices(
    State(state): State<AppState>,
    Query(query): Query<DeviceListQuery>,
) -> Result<Json<SecurityDeviceListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;

    let mut select = security_device::Entity::find();
    if let Some(sub_type) = parse_sub_type::<SecurityDeviceType>(query.sub_asset_type.as_deref())? {
        select = select.filter(security_device::Column::SubAssetType.eq(sub_type));
    }
    let select = select.order_by_asc(security_device::Column::Id);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;
    let assets = assets_by_id(&state.db, models.iter().map(|m| m.asset_id)).await?;

    let data = models
        .into_iter()
        .filter_map(|m| {
            let asset = assets.get(&m.asset_id)?;
            Some(SecurityDeviceResponse::new(m, asset))
        })
        .collect();

    Ok(Json(SecurityDeviceListResponse { data, pagination }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Security Devices",
    operation_id = "getSecurityDevice",
    summary = "Get a security device by ID",
    params(("id" = i32, Path, description = "Security device ID")),
    responses(
        (status = 200, description = "Security device details", body = SecurityDeviceResponse),
        (status = 404, description = "Security device not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_security_device(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SecurityDeviceResponse>, AppError> {
    let model = find_security_device(&state.db, id).await?;
    let asset = find_asset(&state.db, model.asset_id).await?;
    Ok(Json(SecurityDeviceResponse::new(model, &asset)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Security Devices",
    operation_id = "updateSecurityDevice",
    summary = "Update a security device",
    params(("id" = i32, Path, description = "Security device ID")),
    request_body = UpdateSecurityDeviceRequest,
    responses(
        (status = 200, description = "Security device updated", body = SecurityDeviceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Security device not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_security_device(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSecurityDeviceRequest>,
) -> Result<Json<SecurityDeviceResponse>, AppError> {
    validate_model(payload.model.as_deref())?;

    let existing = find_security_device(&state.db, id).await?;
    let asset = find_asset(&state.db, existing.asset_id).await?;

    if payload == UpdateSecurityDeviceRequest::default() {
        return Ok(Json(SecurityDeviceResponse::new(existing, &asset)));
    }

    let mut active: security_device::ActiveModel = existing.into();
    if let Some(sub_type) = payload.sub_asset_type {
        active.sub_asset_type = Set(sub_type);
    }
    if let Some(model) = payload.model {
        active.model = Set(model_or_default(Some(model), security_device::DEFAULT_MODEL));
    }

    let model = active.update(&state.db).await?;
    Ok(Json(SecurityDeviceResponse::new(model, &asset)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Security Devices",
    operation_id = "deleteSecurityDevice",
    summary = "Delete a security device record",
    description = "Deletes the security device sub-record only; the parent asset is kept.",
    params(("id" = i32, Path, description = "Security device ID")),
    responses(
        (status = 204, description = "Security device deleted"),
        (status = 404, description = "Security device not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_security_device(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = security_device::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Security device not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_security_device<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<security_device::Model, AppError> {
    security_device::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Security device not found".into()))
}

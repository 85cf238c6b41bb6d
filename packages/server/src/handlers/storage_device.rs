use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cmdb_common::StorageDeviceType;
use sea_orm::*;
use tracing::instrument;

use crate::entity::storage_device;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::{assets_by_id, fetch_page, find_asset, parse_sub_type, require_asset};
use crate::models::device::*;
use crate::models::shared::page_bounds;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Storage Devices",
    operation_id = "createStorageDevice",
    summary = "Attach storage device details to an asset",
    description = "Creates the storage device sub-record of an asset. Each asset has at most one. `sub_asset_type` defaults to `disk_array` and `model` to `未知设备`.",
    request_body = CreateStorageDeviceRequest,
    responses(
        (status = 201, description = "Storage device created", body = StorageDeviceResponse),
        (status = 400, description = "Validation error or unknown asset (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Asset already has a storage device record (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(asset_id = payload.asset_id))]
pub async fn create_storage_device(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateStorageDeviceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_model(payload.model.as_deref())?;

    let asset = require_asset(&state.db, payload.asset_id).await?;

    let new_device = storage_device::ActiveModel {
        asset_id: Set(payload.asset_id),
        sub_asset_type: Set(payload.sub_asset_type.unwrap_or_default()),
        model: Set(model_or_default(payload.model, storage_device::DEFAULT_MODEL)),
        ..Default::default()
    };
    let model = new_device.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(StorageDeviceResponse::new(model, &asset)),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Storage Devices",
    operation_id = "listStorageDevices",
    summary = "List storage devices",
    params(DeviceListQuery),
    responses(
        (status = 200, description = "List of storage devices", body = StorageDeviceListResponse),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_storage_devices(
    State(state): State<AppState>,
    Query(query): Query<DeviceListQuery>,
) -> Result<Json<StorageDeviceListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;

    let mut select = storage_device::Entity::find();
    if let Some(sub_type) = parse_sub_type::<StorageDeviceType>(query.sub_asset_type.as_deref())? {
        select = select.filter(storage_device::Column::SubAssetType.eq(sub_type));
    }
    let select = select.order_by_asc(storage_device::Column::Id);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;
    let assets = assets_by_id(&state.db, models.iter().map(|m| m.asset_id)).await?;

    let data = models
        .into_iter()
        .filter_map(|m| {
            let asset = assets.get(&m.asset_id)?;
            Some(StorageDeviceResponse::new(m, asset))
        })
        .collect();

    Ok(Json(StorageDeviceListResponse { data, pagination }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Storage Devices",
    operation_id = "getStorageDevice",
    summary = "Get a storage device by ID",
    params(("id" = i32, Path, description = "Storage device ID")),
    responses(
        (status = 200, description = "Storage device details", body = StorageDeviceResponse),
        (status = 404, description = "Storage device not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_storage_device(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StorageDeviceResponse>, AppError> {
    let model = find_storage_device(&state.db, id).await?;
    let asset = find_asset(&state.db, model.asset_id).await?;
    Ok(Json(StorageDeviceResponse::new(model, &asset)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Storage Devices",
    operation_id = "updateStorageDevice",
    summary = "Update a storage device",
    params(("id" = i32, Path, description = "Storage device ID")),
    request_body = UpdateStorageDeviceRequest,
    responses(
        (status = 200, description = "Storage device updated", body = StorageDeviceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Storage device not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_storage_device(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateStorageDeviceRequest>,
) -> Result<Json<StorageDeviceResponse>, AppError> {
    validate_model(payload.model.as_deref())?;

    let existing = find_storage_device(&state.db, id).await?;
    let asset = find_asset(&state.db, existing.asset_id).await?;

    if payload == UpdateStorageDeviceRequest::default() {
        return Ok(Json(StorageDeviceResponse::new(existing, &asset)));
    }

    let mut active: storage_device::ActiveModel = existing.into();
    if let Some(sub_type) = payload.sub_asset_type {
        active.sub_asset_type = Set(sub_type);
    }
    if let Some(model) = payload.model {
        active.model = Set(model_or_default(Some(model), storage_device::DEFAULT_MODEL));
    }

    let model = active.update(&state.db).await?;
    Ok(Json(StorageDeviceResponse::new(model, &asset)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Storage Devices",
    operation_id = "deleteStorageDevice",
    summary = "Delete a storage device record",
    description = "Deletes the storage device sub-record only; the parent asset is kept.",
    params(("id" = i32, Path, description = "Storage device ID")),
    responses(
        (status = 204, description = "Storage device deleted"),
        (status = 404, description = "Storage device not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_storage_device(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = storage_device::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Storage device not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_storage_device<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<storage_device::Model, AppError> {
    storage_device::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Storage device not found".into()))
}

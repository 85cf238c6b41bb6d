use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cmdb_common::NetworkDeviceType;
use sea_orm::*;
use tracing::instrument;

use crate::entity::network_device;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::{assets_by_id, fetch_page, find_asset, parse_sub_type, require_asset};
use crate::models::device::*;
use crate::models::shared::{normalize_ip, page_bounds, trim_optional};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Network Devices",
    operation_id = "createNetworkDevice",
    summary = "Attach network device details to an asset",
    description = "Creates the network device sub-record of an asset. Each asset has at most one. `sub_asset_type` defaults to `router` and `model` to `未知型号`.",
    request_body = CreateNetworkDeviceRequest,
    responses(
        (status = 201, description = "Network device created", body = NetworkDeviceResponse),
        (status = 400, description = "Validation error or unknown asset (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Asset already has a network device record (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(asset_id = payload.asset_id))]
pub async fn create_network_device(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateNetworkDeviceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_network_device(&payload)?;

    let asset = require_asset(&state.db, payload.asset_id).await?;

    let new_device = network_device::ActiveModel {
        asset_id: Set(payload.asset_id),
        sub_asset_type: Set(payload.sub_asset_type.unwrap_or_default()),
        vlan_ip: Set(normalize_ip(payload.vlan_ip)),
        intranet_ip: Set(normalize_ip(payload.intranet_ip)),
        model: Set(model_or_default(
            payload.model,
            network_device::DEFAULT_MODEL,
        )),
        firmware: Set(trim_optional(payload.firmware)),
        port_num: Set(payload.port_num),
        ..Default::default()
    };
    let model = new_device.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(NetworkDeviceResponse::new(model, &asset)),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Network Devices",
    operation_id = "listNetworkDevices",
    summary = "List network devices",
    params(DeviceListQuery),
    responses(
        (status = 200, description = "List of network devices", body = NetworkDeviceListResponse),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_network_devices(
    State(state): State<AppState>,
    Query(query): Query<DeviceListQuery>,
) -> Result<Json<NetworkDeviceListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;

    let mut select = network_device::Entity::find();
    if let Some(sub_type) =
        parse_sub_type::<NetworkDeviceType>(query.sub_asset_type.as_deref())?
    {
        select = select.filter(network_device::Column::SubAssetType.eq(sub_type));
    }
    let select = select.order_by_asc(network_device::Column::Id);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;
    let assets = assets_by_id(&state.db, models.iter().map(|m| m.asset_id)).await?;

    let data = models
        .into_iter()
        .filter_map(|m| {
            let asset = assets.get(&m.asset_id)?;
            Some(NetworkDeviceResponse::new(m, asset))
        })
        .collect();

    Ok(Json(NetworkDeviceListResponse { data, pagination }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Network Devices",
    operation_id = "getNetworkDevice",
    summary = "Get a network device by ID",
    params(("id" = i32, Path, description = "Network device ID")),
    responses(
        (status = 200, description = "Network device details", body = NetworkDeviceResponse),
        (status = 404, description = "Network device not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_network_device(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NetworkDeviceResponse>, AppError> {
    let model = find_network_device(&state.db, id).await?;
    let asset = find_asset(&state.db, model.asset_id).await?;
    Ok(Json(NetworkDeviceResponse::new(model, &asset)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Network Devices",
    operation_id = "updateNetworkDevice",
    summary = "Update a network device",
    params(("id" = i32, Path, description = "Network device ID")),
    request_body = UpdateNetworkDeviceRequest,
    responses(
        (status = 200, description = "Network device updated", body = NetworkDeviceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Network device not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_network_device(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateNetworkDeviceRequest>,
) -> Result<Json<NetworkDeviceResponse>, AppError> {
    validate_update_network_device(&payload)?;

    let existing = find_network_device(&state.db, id).await?;
    let asset = find_asset(&state.db, existing.asset_id).await?;

    if payload == UpdateNetworkDeviceRequest::default() {
        return Ok(Json(NetworkDeviceResponse::new(existing, &asset)));
    }

    let mut active: network_device::ActiveModel = existing.into();

    if let Some(sub_type) = payload.sub_asset_type {
        active.sub_asset_type = Set(sub_type);
    }
    if let Some(ip) = payload.vlan_ip {
        active.vlan_ip = Set(normalize_ip(ip));
    }
    if let Some(ip) = payload.intranet_ip {
        active.intranet_ip = Set(normalize_ip(ip));
    }
    if let Some(model) = payload.model {
        active.model = Set(model_or_default(Some(model), network_device::DEFAULT_MODEL));
    }
    if let Some(firmware) = payload.firmware {
        active.firmware = Set(trim_optional(firmware));
    }
    if let Some(port_num) = payload.port_num {
        active.port_num = Set(port_num);
    }

    let model = active.update(&state.db).await?;
    Ok(Json(NetworkDeviceResponse::new(model, &asset)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Network Devices",
    operation_id = "deleteNetworkDevice",
    summary = "Delete a network device record",
    description = "Deletes the network device sub-record only; the parent asset is kept.",
    params(("id" = i32, Path, description = "Network device ID")),
    responses(
        (status = 204, description = "Network device deleted"),
        (status = 404, description = "Network device not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_network_device(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = network_device::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Network device not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_network_device<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<network_device::Model, AppError> {
    network_device::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Network device not found".into()))
}

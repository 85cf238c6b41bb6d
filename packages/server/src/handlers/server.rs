use std::collections::HashSet;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cmdb_common::ServerType;
use sea_orm::*;
use tracing::instrument;

use crate::entity::server;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::{assets_by_id, fetch_page, find_asset, parse_sub_type, require_asset};
use crate::models::device::*;
use crate::models::shared::{page_bounds, trim_optional};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Servers",
    operation_id = "createServer",
    summary = "Attach server details to an asset",
    description = "Creates the server sub-record of an asset. Each asset has at most one. `sub_asset_type` defaults to `pc_server` and `created_by` to `auto`.",
    request_body = CreateServerRequest,
    responses(
        (status = 201, description = "Server created", body = ServerResponse),
        (status = 400, description = "Validation error, unknown asset or host (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Asset already has a server record (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(asset_id = payload.asset_id))]
pub async fn create_server(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateServerRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_server(&payload)?;

    let asset = require_asset(&state.db, payload.asset_id).await?;
    if let Some(host_id) = payload.hosted_on_id {
        find_host(&state.db, host_id).await?;
    }

    let new_server = server::ActiveModel {
        asset_id: Set(payload.asset_id),
        sub_asset_type: Set(payload.sub_asset_type.unwrap_or_default()),
        created_by: Set(payload.created_by.unwrap_or_default()),
        hosted_on_id: Set(payload.hosted_on_id),
        model: Set(trim_optional(payload.model)),
        raid_type: Set(trim_optional(payload.raid_type)),
        os_type: Set(trim_optional(payload.os_type)),
        os_distribution: Set(trim_optional(payload.os_distribution)),
        os_release: Set(trim_optional(payload.os_release)),
        ..Default::default()
    };
    let model = new_server.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(ServerResponse::new(model, &asset)),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Servers",
    operation_id = "listServers",
    summary = "List servers",
    description = "Returns a paginated list of server records ordered by ID. `sub_asset_type` filters by category key.",
    params(DeviceListQuery),
    responses(
        (status = 200, description = "List of servers", body = ServerListResponse),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_servers(
    State(state): State<AppState>,
    Query(query): Query<DeviceListQuery>,
) -> Result<Json<ServerListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;

    let mut select = server::Entity::find();
    if let Some(sub_type) = parse_sub_type::<ServerType>(query.sub_asset_type.as_deref())? {
        select = select.filter(server::Column::SubAssetType.eq(sub_type));
    }
    let select = select.order_by_asc(server::Column::Id);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;
    let assets = assets_by_id(&state.db, models.iter().map(|m| m.asset_id)).await?;

    let data = models
        .into_iter()
        .filter_map(|m| {
            let asset = assets.get(&m.asset_id)?;
            Some(ServerResponse::new(m, asset))
        })
        .collect();

    Ok(Json(ServerListResponse { data, pagination }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Servers",
    operation_id = "getServer",
    summary = "Get a server by ID",
    params(("id" = i32, Path, description = "Server ID")),
    responses(
        (status = 200, description = "Server details", body = ServerResponse),
        (status = 404, description = "Server not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_server(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ServerResponse>, AppError> {
    let model = find_server(&state.db, id).await?;
    let asset = find_asset(&state.db, model.asset_id).await?;
    Ok(Json(ServerResponse::new(model, &asset)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Servers",
    operation_id = "updateServer",
    summary = "Update a server",
    description = "Partially updates a server record. `null` clears nullable fields. A server cannot be hosted on itself or on a server that is, directly or transitively, hosted on it.",
    params(("id" = i32, Path, description = "Server ID")),
    request_body = UpdateServerRequest,
    responses(
        (status = 200, description = "Server updated", body = ServerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Server not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_server(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateServerRequest>,
) -> Result<Json<ServerResponse>, AppError> {
    validate_update_server(&payload)?;

    let existing = find_server(&state.db, id).await?;
    let asset = find_asset(&state.db, existing.asset_id).await?;

    if payload == UpdateServerRequest::default() {
        return Ok(Json(ServerResponse::new(existing, &asset)));
    }

    if let Some(Some(host_id)) = payload.hosted_on_id {
        ensure_no_host_cycle(&state.db, id, host_id).await?;
    }

    let mut active: server::ActiveModel = existing.into();

    if let Some(sub_type) = payload.sub_asset_type {
        active.sub_asset_type = Set(sub_type);
    }
    if let Some(created_by) = payload.created_by {
        active.created_by = Set(created_by);
    }
    if let Some(host) = payload.hosted_on_id {
        active.hosted_on_id = Set(host);
    }
    if let Some(model) = payload.model {
        active.model = Set(trim_optional(model));
    }
    if let Some(raid_type) = payload.raid_type {
        active.raid_type = Set(trim_optional(raid_type));
    }
    if let Some(os_type) = payload.os_type {
        active.os_type = Set(trim_optional(os_type));
    }
    if let Some(dist) = payload.os_distribution {
        active.os_distribution = Set(trim_optional(dist));
    }
    if let Some(release) = payload.os_release {
        active.os_release = Set(trim_optional(release));
    }

    let model = active.update(&state.db).await?;
    Ok(Json(ServerResponse::new(model, &asset)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Servers",
    operation_id = "deleteServer",
    summary = "Delete a server record",
    description = "Deletes the server sub-record only; the parent asset is kept. Virtual machines hosted on this server are deleted with it.",
    params(("id" = i32, Path, description = "Server ID")),
    responses(
        (status = 204, description = "Server deleted"),
        (status = 404, description = "Server not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_server(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = server::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Server not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_server<C: ConnectionTrait>(db: &C, id: i32) -> Result<server::Model, AppError> {
    server::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Server not found".into()))
}

async fn find_host<C: ConnectionTrait>(db: &C, id: i32) -> Result<server::Model, AppError> {
    server::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Validation(format!("Host server {id} does not exist")))
}

/// Reject `host_id` as the host of `id` if the host chain starting at
/// `host_id` reaches `id`.
async fn ensure_no_host_cycle<C: ConnectionTrait>(
    db: &C,
    id: i32,
    host_id: i32,
) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    let mut current = Some(host_id);

    while let Some(cursor) = current {
        if cursor == id {
            return Err(AppError::Validation(if cursor == host_id {
                "A server cannot be hosted on itself".into()
            } else {
                format!("Hosting server {id} on {host_id} would create a cycle")
            }));
        }
        if !seen.insert(cursor) {
            break;
        }
        current = find_host(db, cursor).await?.hosted_on_id;
    }
    Ok(())
}

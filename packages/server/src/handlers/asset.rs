use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{asset, asset_tag, tag};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::{fetch_page, find_asset};
use crate::models::asset::*;
use crate::models::shared::{
    escape_like, normalize_ip, page_bounds, trim_optional, validate_date_range, validate_id_set,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Assets",
    operation_id = "createAsset",
    summary = "Create a new asset",
    description = "Creates an asset record. `asset_type` defaults to `server` and `status` to `online`. Name and serial number must be unique. Optional references (business unit, manufacturer, IDC, contract, admin, approver, tags) must point at existing records.",
    request_body = CreateAssetRequest,
    responses(
        (status = 201, description = "Asset created", body = AssetResponse),
        (status = 400, description = "Validation error or unknown reference (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name or serial number already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name, sn = %payload.sn))]
pub async fn create_asset(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAssetRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_asset(&payload)?;

    let txn = state.db.begin().await?;

    let now = chrono::Utc::now();
    let new_asset = asset::ActiveModel {
        asset_type: Set(payload.asset_type.unwrap_or_default()),
        name: Set(payload.name.trim().to_string()),
        sn: Set(payload.sn.trim().to_string()),
        status: Set(payload.status.unwrap_or_default()),
        manage_ip: Set(normalize_ip(payload.manage_ip)),
        memo: Set(trim_optional(payload.memo)),
        price: Set(payload.price),
        purchase_day: Set(payload.purchase_day),
        expire_day: Set(payload.expire_day),
        business_unit_id: Set(payload.business_unit_id),
        manufacturer_id: Set(payload.manufacturer_id),
        idc_id: Set(payload.idc_id),
        contract_id: Set(payload.contract_id),
        admin_id: Set(payload.admin_id),
        approved_by_id: Set(payload.approved_by_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = new_asset.insert(&txn).await?;

    replace_tags(&txn, model.id, &payload.tag_ids).await?;
    let tags = load_tags(&txn, model.id).await?;

    txn.commit().await?;

    tracing::info!(asset_id = model.id, "Asset created");
    Ok((StatusCode::CREATED, Json(AssetResponse::new(model, tags))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Assets",
    operation_id = "listAssets",
    summary = "List assets with pagination and filters",
    description = "Returns a paginated list of assets, newest first. Supports filtering by type, status, business unit and IDC, and case-insensitive search on name or serial number.",
    params(AssetListQuery),
    responses(
        (status = 200, description = "List of assets", body = AssetListResponse),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<AssetListQuery>,
) -> Result<Json<AssetListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;

    let mut select = asset::Entity::find();

    if let Some(asset_type) = query.asset_type {
        select = select.filter(asset::Column::AssetType.eq(asset_type));
    }
    if let Some(status) = query.status {
        select = select.filter(asset::Column::Status.eq(status));
    }
    if let Some(bu) = query.business_unit_id {
        select = select.filter(asset::Column::BusinessUnitId.eq(bu));
    }
    if let Some(idc) = query.idc_id {
        select = select.filter(asset::Column::IdcId.eq(idc));
    }
    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            let pattern = format!("%{}%", term.to_lowercase());
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(asset::Column::Name)))
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(asset::Column::Sn)))
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            );
        }
    }

    let select = select
        .order_by_desc(asset::Column::CreatedAt)
        .order_by_desc(asset::Column::Id);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;

    Ok(Json(AssetListResponse {
        data: models.into_iter().map(AssetListItem::from).collect(),
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Assets",
    operation_id = "getAsset",
    summary = "Get an asset by ID",
    description = "Returns the full asset record, its tags and its display string.",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = AssetResponse),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AssetResponse>, AppError> {
    let model = find_asset(&state.db, id).await?;
    let tags = load_tags(&state.db, id).await?;
    Ok(Json(AssetResponse::new(model, tags)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Assets",
    operation_id = "updateAsset",
    summary = "Update an existing asset",
    description = "Partially updates an asset using PATCH semantics: absent fields are kept, `null` clears a nullable field. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAssetRequest,
    responses(
        (status = 200, description = "Asset updated", body = AssetResponse),
        (status = 400, description = "Validation error or unknown reference (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name or serial number already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateAssetRequest>,
) -> Result<Json<AssetResponse>, AppError> {
    validate_update_asset(&payload)?;

    if payload == UpdateAssetRequest::default() {
        let existing = find_asset(&state.db, id).await?;
        let tags = load_tags(&state.db, id).await?;
        return Ok(Json(AssetResponse::new(existing, tags)));
    }

    let txn = state.db.begin().await?;

    let existing = find_asset(&txn, id).await?;

    let purchase_day = payload.purchase_day.unwrap_or(existing.purchase_day);
    let expire_day = payload.expire_day.unwrap_or(existing.expire_day);
    validate_date_range(purchase_day, expire_day, "purchase_day", "expire_day")?;

    let mut active: asset::ActiveModel = existing.into();

    if let Some(asset_type) = payload.asset_type {
        active.asset_type = Set(asset_type);
    }
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref sn) = payload.sn {
        active.sn = Set(sn.trim().to_string());
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(ip) = payload.manage_ip {
        active.manage_ip = Set(normalize_ip(ip));
    }
    if let Some(memo) = payload.memo {
        active.memo = Set(trim_optional(memo));
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    active.purchase_day = Set(purchase_day);
    active.expire_day = Set(expire_day);
    if let Some(bu) = payload.business_unit_id {
        active.business_unit_id = Set(bu);
    }
    if let Some(m) = payload.manufacturer_id {
        active.manufacturer_id = Set(m);
    }
    if let Some(idc) = payload.idc_id {
        active.idc_id = Set(idc);
    }
    if let Some(contract) = payload.contract_id {
        active.contract_id = Set(contract);
    }
    if let Some(admin) = payload.admin_id {
        active.admin_id = Set(admin);
    }
    if let Some(approver) = payload.approved_by_id {
        active.approved_by_id = Set(approver);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    let tags = load_tags(&txn, id).await?;
    txn.commit().await?;

    Ok(Json(AssetResponse::new(model, tags)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Assets",
    operation_id = "deleteAsset",
    summary = "Delete an asset by ID",
    description = "Permanently deletes an asset. Its server, network, storage or security sub-record and its tag links are removed with it.",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = asset::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Asset not found".into()));
    }

    tracing::info!(asset_id = id, "Asset deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/{id}/tags",
    tag = "Assets",
    operation_id = "setAssetTags",
    summary = "Replace an asset's tags",
    description = "Replaces the full tag set of an asset. Every tag ID must exist.",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = SetAssetTagsRequest,
    responses(
        (status = 200, description = "Tags replaced", body = AssetResponse),
        (status = 400, description = "Duplicate or unknown tag (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, count = payload.tag_ids.len()))]
pub async fn set_asset_tags(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<SetAssetTagsRequest>,
) -> Result<Json<AssetResponse>, AppError> {
    validate_id_set(&payload.tag_ids, "tag", MAX_TAGS)?;

    let txn = state.db.begin().await?;
    let model = find_asset(&txn, id).await?;

    asset_tag::Entity::delete_many()
        .filter(asset_tag::Column::AssetId.eq(id))
        .exec(&txn)
        .await?;
    replace_tags(&txn, id, &payload.tag_ids).await?;

    let tags = load_tags(&txn, id).await?;
    txn.commit().await?;

    Ok(Json(AssetResponse::new(model, tags)))
}

/// Insert junction rows for `tag_ids`, rejecting unknown tags.
async fn replace_tags<C: ConnectionTrait>(
    db: &C,
    asset_id: i32,
    tag_ids: &[i32],
) -> Result<(), AppError> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    let found = tag::Entity::find()
        .filter(tag::Column::Id.is_in(tag_ids.iter().copied()))
        .count(db)
        .await?;
    if found != tag_ids.len() as u64 {
        return Err(AppError::Validation("One or more tags do not exist".into()));
    }

    let rows = tag_ids.iter().map(|&tag_id| asset_tag::ActiveModel {
        asset_id: Set(asset_id),
        tag_id: Set(tag_id),
    });
    asset_tag::Entity::insert_many(rows)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Tags attached to an asset, ordered by name.
async fn load_tags<C: ConnectionTrait>(db: &C, asset_id: i32) -> Result<Vec<tag::Model>, AppError> {
    let tag_ids: Vec<i32> = asset_tag::Entity::find()
        .filter(asset_tag::Column::AssetId.eq(asset_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.tag_id)
        .collect();

    if tag_ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(tag::Entity::find()
        .filter(tag::Column::Id.is_in(tag_ids))
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await?)
}

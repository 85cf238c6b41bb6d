//! Create, list, get and delete for the records assets reference.
//!
//! Deleting any of these leaves referencing assets in place with the
//! reference cleared.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{business_unit, contract, idc, manufacturer, tag, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::fetch_page;
use crate::models::catalog::*;
use crate::models::shared::{ListQuery, page_bounds, trim_optional};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Business Units",
    operation_id = "createBusinessUnit",
    summary = "Create a business unit",
    request_body = CreateBusinessUnitRequest,
    responses(
        (status = 201, description = "Business unit created", body = BusinessUnitResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_business_unit(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBusinessUnitRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_business_unit(&payload)?;

    let new_unit = business_unit::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        memo: Set(trim_optional(payload.memo)),
        parent_unit_id: Set(payload.parent_unit_id),
        ..Default::default()
    };
    let model = new_unit.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(BusinessUnitResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Business Units",
    operation_id = "listBusinessUnits",
    summary = "List business units",
    params(ListQuery),
    responses(
        (status = 200, description = "List of business units", body = CatalogListResponse<BusinessUnitResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_business_units(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CatalogListResponse<BusinessUnitResponse>>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;
    let select = business_unit::Entity::find().order_by_asc(business_unit::Column::Name);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;

    Ok(Json(CatalogListResponse {
        data: models.into_iter().map(BusinessUnitResponse::from).collect(),
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Business Units",
    operation_id = "getBusinessUnit",
    summary = "Get a business unit by ID",
    params(("id" = i32, Path, description = "Business unit ID")),
    responses(
        (status = 200, description = "Business unit details", body = BusinessUnitResponse),
        (status = 404, description = "Business unit not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_business_unit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BusinessUnitResponse>, AppError> {
    let model = business_unit::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business unit not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Business Units",
    operation_id = "deleteBusinessUnit",
    summary = "Delete a business unit",
    description = "Deletes the business unit. Assets that reference it are kept with the reference set to null. Child units keep existing with their parent cleared.",
    params(("id" = i32, Path, description = "Business unit ID")),
    responses(
        (status = 204, description = "Business unit deleted"),
        (status = 404, description = "Business unit not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_business_unit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = business_unit::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Business unit not found".into()));
    }

    tracing::info!(business_unit_id = id, "Business unit deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Manufacturers",
    operation_id = "createManufacturer",
    summary = "Create a manufacturer",
    request_body = CreateManufacturerRequest,
    responses(
        (status = 201, description = "Manufacturer created", body = ManufacturerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateManufacturerRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_manufacturer(&payload)?;

    let new_manufacturer = manufacturer::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        telephone: Set(trim_optional(payload.telephone)),
        memo: Set(trim_optional(payload.memo)),
        ..Default::default()
    };
    let model = new_manufacturer.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ManufacturerResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Manufacturers",
    operation_id = "listManufacturers",
    summary = "List manufacturers",
    params(ListQuery),
    responses(
        (status = 200, description = "List of manufacturers", body = CatalogListResponse<ManufacturerResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_manufacturers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CatalogListResponse<ManufacturerResponse>>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;
    let select = manufacturer::Entity::find().order_by_asc(manufacturer::Column::Name);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;

    Ok(Json(CatalogListResponse {
        data: models.into_iter().map(ManufacturerResponse::from).collect(),
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Manufacturers",
    operation_id = "getManufacturer",
    summary = "Get a manufacturer by ID",
    params(("id" = i32, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Manufacturer details", body = ManufacturerResponse),
        (status = 404, description = "Manufacturer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ManufacturerResponse>, AppError> {
    let model = manufacturer::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Manufacturer not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Manufacturers",
    operation_id = "deleteManufacturer",
    summary = "Delete a manufacturer",
    description = "Deletes the manufacturer. Assets that reference it are kept with the reference set to null.",
    params(("id" = i32, Path, description = "Manufacturer ID")),
    responses(
        (status = 204, description = "Manufacturer deleted"),
        (status = 404, description = "Manufacturer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = manufacturer::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Manufacturer not found".into()));
    }

    tracing::info!(manufacturer_id = id, "Manufacturer deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "IDCs",
    operation_id = "createIdc",
    summary = "Create a IDC",
    request_body = CreateIdcRequest,
    responses(
        (status = 201, description = "IDC created", body = IdcResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_idc(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateIdcRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_idc(&payload)?;

    let new_idc = idc::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        memo: Set(trim_optional(payload.memo)),
        ..Default::default()
    };
    let model = new_idc.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(IdcResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "IDCs",
    operation_id = "listIdcs",
    summary = "List IDCs",
    params(ListQuery),
    responses(
        (status = 200, description = "List of IDCs", body = CatalogListResponse<IdcResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_idcs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CatalogListResponse<IdcResponse>>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;
    let select = idc::Entity::find().order_by_asc(idc::Column::Name);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;

    Ok(Json(CatalogListResponse {
        data: models.into_iter().map(IdcResponse::from).collect(),
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "IDCs",
    operation_id = "getIdc",
    summary = "Get a IDC by ID",
    params(("id" = i32, Path, description = "IDC ID")),
    responses(
        (status = 200, description = "IDC details", body = IdcResponse),
        (status = 404, description = "IDC not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_idc(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IdcResponse>, AppError> {
    let model = idc::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("IDC not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "IDCs",
    operation_id = "deleteIdc",
    summary = "Delete a IDC",
    description = "Deletes the IDC. Assets that reference it are kept with the reference set to null.",
    params(("id" = i32, Path, description = "IDC ID")),
    responses(
        (status = 204, description = "IDC deleted"),
        (status = 404, description = "IDC not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_idc(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = idc::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("IDC not found".into()));
    }

    tracing::info!(idc_id = id, "IDC deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Contracts",
    operation_id = "createContract",
    summary = "Create a contract",
    request_body = CreateContractRequest,
    responses(
        (status = 201, description = "Contract created", body = ContractResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Contract number already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(sn = %payload.sn))]
pub async fn create_contract(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContractRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_contract(&payload)?;

    let now = chrono::Utc::now();
    let new_contract = contract::ActiveModel {
        sn: Set(payload.sn.trim().to_string()),
        name: Set(payload.name.trim().to_string()),
        memo: Set(trim_optional(payload.memo)),
        price: Set(payload.price),
        detail: Set(trim_optional(payload.detail)),
        start_day: Set(payload.start_day),
        end_day: Set(payload.end_day),
        license_num: Set(payload.license_num.unwrap_or(1)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = new_contract.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ContractResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Contracts",
    operation_id = "listContracts",
    summary = "List contracts",
    params(ListQuery),
    responses(
        (status = 200, description = "List of contracts", body = CatalogListResponse<ContractResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_contracts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CatalogListResponse<ContractResponse>>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;
    let select = contract::Entity::find().order_by_asc(contract::Column::Sn);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;

    Ok(Json(CatalogListResponse {
        data: models.into_iter().map(ContractResponse::from).collect(),
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Contracts",
    operation_id = "getContract",
    summary = "Get a contract by ID",
    params(("id" = i32, Path, description = "Contract ID")),
    responses(
        (status = 200, description = "Contract details", body = ContractResponse),
        (status = 404, description = "Contract not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContractResponse>, AppError> {
    let model = contract::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contract not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Contracts",
    operation_id = "deleteContract",
    summary = "Delete a contract",
    description = "Deletes the contract. Assets that reference it are kept with the reference set to null.",
    params(("id" = i32, Path, description = "Contract ID")),
    responses(
        (status = 204, description = "Contract deleted"),
        (status = 404, description = "Contract not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_contract(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = contract::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Contract not found".into()));
    }

    tracing::info!(contract_id = id, "Contract deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Tags",
    operation_id = "createTag",
    summary = "Create a tag",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_tag(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTagRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_tag(&payload)?;

    let new_tag = tag::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_tag.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(TagResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Tags",
    operation_id = "listTags",
    summary = "List tags",
    params(ListQuery),
    responses(
        (status = 200, description = "List of tags", body = CatalogListResponse<TagResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_tags(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CatalogListResponse<TagResponse>>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;
    let select = tag::Entity::find().order_by_asc(tag::Column::Name);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;

    Ok(Json(CatalogListResponse {
        data: models.into_iter().map(TagResponse::from).collect(),
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Tags",
    operation_id = "getTag",
    summary = "Get a tag by ID",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag details", body = TagResponse),
        (status = 404, description = "Tag not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, AppError> {
    let model = tag::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Tags",
    operation_id = "deleteTag",
    summary = "Delete a tag",
    description = "Deletes the tag and detaches it from every asset.",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "Tag not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = tag::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Tag not found".into()));
    }

    tracing::info!(tag_id = id, "Tag deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    operation_id = "createUser",
    summary = "Create a user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Username already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_user(&payload)?;

    let new_user = user::ActiveModel {
        username: Set(payload.username.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_user.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List users",
    params(ListQuery),
    responses(
        (status = 200, description = "List of users", body = CatalogListResponse<UserResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CatalogListResponse<UserResponse>>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page)?;
    let select = user::Entity::find().order_by_asc(user::Column::Username);

    let (models, pagination) = fetch_page(&state.db, select, page, per_page).await?;

    Ok(Json(CatalogListResponse {
        data: models.into_iter().map(UserResponse::from).collect(),
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user by ID",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let model = user::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    operation_id = "deleteUser",
    summary = "Delete a user",
    description = "Deletes the user. Assets that reference it are kept with the reference set to null.",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = user::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

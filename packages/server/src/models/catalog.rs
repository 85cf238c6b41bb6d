//! Bodies for the records assets point at: business units, manufacturers,
//! data centers, contracts, tags and users.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{business_unit, contract, idc, manufacturer, tag, user};
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{validate_date_range, validate_optional, validate_required};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBusinessUnitRequest {
    pub name: String,
    pub memo: Option<String>,
    pub parent_unit_id: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BusinessUnitResponse {
    pub id: i32,
    pub name: String,
    pub memo: Option<String>,
    pub parent_unit_id: Option<i32>,
}

impl From<business_unit::Model> for BusinessUnitResponse {
    fn from(m: business_unit::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            memo: m.memo,
            parent_unit_id: m.parent_unit_id,
        }
    }
}

pub fn validate_create_business_unit(req: &CreateBusinessUnitRequest) -> Result<(), AppError> {
    validate_required(&req.name, "Name", 64)?;
    validate_optional(req.memo.as_deref(), "Memo", 64)
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateManufacturerRequest {
    pub name: String,
    pub telephone: Option<String>,
    pub memo: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ManufacturerResponse {
    pub id: i32,
    pub name: String,
    pub telephone: Option<String>,
    pub memo: Option<String>,
}

impl From<manufacturer::Model> for ManufacturerResponse {
    fn from(m: manufacturer::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            telephone: m.telephone,
            memo: m.memo,
        }
    }
}

pub fn validate_create_manufacturer(req: &CreateManufacturerRequest) -> Result<(), AppError> {
    validate_required(&req.name, "Name", 64)?;
    validate_optional(req.telephone.as_deref(), "Telephone", 30)?;
    validate_optional(req.memo.as_deref(), "Memo", 128)
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateIdcRequest {
    pub name: String,
    pub memo: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct IdcResponse {
    pub id: i32,
    pub name: String,
    pub memo: Option<String>,
}

impl From<idc::Model> for IdcResponse {
    fn from(m: idc::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            memo: m.memo,
        }
    }
}

pub fn validate_create_idc(req: &CreateIdcRequest) -> Result<(), AppError> {
    validate_required(&req.name, "Name", 64)?;
    validate_optional(req.memo.as_deref(), "Memo", 128)
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateContractRequest {
    pub sn: String,
    pub name: String,
    pub memo: Option<String>,
    pub price: i32,
    pub detail: Option<String>,
    pub start_day: Option<NaiveDate>,
    pub end_day: Option<NaiveDate>,
    /// Defaults to 1.
    pub license_num: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContractResponse {
    pub id: i32,
    pub sn: String,
    pub name: String,
    pub memo: Option<String>,
    pub price: i32,
    pub detail: Option<String>,
    pub start_day: Option<NaiveDate>,
    pub end_day: Option<NaiveDate>,
    pub license_num: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<contract::Model> for ContractResponse {
    fn from(m: contract::Model) -> Self {
        Self {
            id: m.id,
            sn: m.sn,
            name: m.name,
            memo: m.memo,
            price: m.price,
            detail: m.detail,
            start_day: m.start_day,
            end_day: m.end_day,
            license_num: m.license_num,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_contract(req: &CreateContractRequest) -> Result<(), AppError> {
    validate_required(&req.sn, "Contract number", 128)?;
    validate_required(&req.name, "Name", 64)?;
    if req.price < 0 {
        return Err(AppError::Validation("Price must be >= 0".into()));
    }
    if let Some(n) = req.license_num
        && n < 0
    {
        return Err(AppError::Validation("License count must be >= 0".into()));
    }
    validate_date_range(req.start_day, req.end_day, "start_day", "end_day")
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTagRequest {
    pub name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<tag::Model> for TagResponse {
    fn from(m: tag::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_tag(req: &CreateTagRequest) -> Result<(), AppError> {
    validate_required(&req.name, "Name", 32)
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_user(req: &CreateUserRequest) -> Result<(), AppError> {
    let username = req.username.trim();
    if username.is_empty() || username.chars().count() > 150 {
        return Err(AppError::Validation(
            "Username must be 1-150 characters".into(),
        ));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AppError::Validation(
            "Username must not contain whitespace".into(),
        ));
    }
    Ok(())
}

/// Paginated list wrapper used by every catalog listing.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CatalogListResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

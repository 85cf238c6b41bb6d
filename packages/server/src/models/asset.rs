use chrono::{DateTime, NaiveDate, Utc};
use cmdb_common::{AssetStatus, AssetType};
use serde::{Deserialize, Serialize};

use crate::entity::{asset, tag};
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{validate_date_range, validate_id_set, validate_ip, validate_required};

pub const NAME_MAX: usize = 64;
pub const SN_MAX: usize = 128;
pub const MAX_TAGS: usize = 100;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateAssetRequest {
    /// Defaults to `server`.
    pub asset_type: Option<AssetType>,
    #[schema(example = "db01")]
    pub name: String,
    /// Serial number.
    #[schema(example = "SN123")]
    pub sn: String,
    /// Defaults to `online`.
    pub status: Option<AssetStatus>,
    #[schema(example = "10.0.0.8")]
    pub manage_ip: Option<String>,
    pub memo: Option<String>,
    pub price: Option<f64>,
    pub purchase_day: Option<NaiveDate>,
    pub expire_day: Option<NaiveDate>,
    pub business_unit_id: Option<i32>,
    pub manufacturer_id: Option<i32>,
    pub idc_id: Option<i32>,
    pub contract_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub approved_by_id: Option<i32>,
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

/// PATCH body. Nullable fields accept `null` to clear the value.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateAssetRequest {
    pub asset_type: Option<AssetType>,
    pub name: Option<String>,
    pub sn: Option<String>,
    pub status: Option<AssetStatus>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<String>)]
    pub manage_ip: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<String>)]
    pub memo: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub purchase_day: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub expire_day: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<i32>)]
    pub business_unit_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<i32>)]
    pub manufacturer_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<i32>)]
    pub idc_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<i32>)]
    pub contract_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<i32>)]
    pub admin_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::shared::double_option")]
    #[schema(value_type = Option<i32>)]
    pub approved_by_id: Option<Option<i32>>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SetAssetTagsRequest {
    /// Replaces the asset's full tag set. An empty list removes all tags.
    pub tag_ids: Vec<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TagSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetResponse {
    pub id: i32,
    pub asset_type: AssetType,
    pub name: String,
    pub sn: String,
    pub status: AssetStatus,
    pub manage_ip: Option<String>,
    pub memo: Option<String>,
    pub price: Option<f64>,
    pub purchase_day: Option<NaiveDate>,
    pub expire_day: Option<NaiveDate>,
    pub business_unit_id: Option<i32>,
    pub manufacturer_id: Option<i32>,
    pub idc_id: Option<i32>,
    pub contract_id: Option<i32>,
    pub admin_id: Option<i32>,
    pub approved_by_id: Option<i32>,
    pub tags: Vec<TagSummary>,
    /// `<{type label}> {name}`
    #[schema(example = "<服务器> db01")]
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetListItem {
    pub id: i32,
    pub asset_type: AssetType,
    pub name: String,
    pub sn: String,
    pub status: AssetStatus,
    pub manage_ip: Option<String>,
    pub business_unit_id: Option<i32>,
    pub idc_id: Option<i32>,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetListResponse {
    pub data: Vec<AssetListItem>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssetListQuery {
    /// Page number (1-based). Default: 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Default: 20.
    pub per_page: Option<u64>,
    pub asset_type: Option<AssetType>,
    pub status: Option<AssetStatus>,
    pub business_unit_id: Option<i32>,
    pub idc_id: Option<i32>,
    /// Case-insensitive substring match on name or serial number.
    pub search: Option<String>,
}

impl AssetResponse {
    pub fn new(m: asset::Model, tags: Vec<tag::Model>) -> Self {
        let display_name = m.display_name();
        Self {
            id: m.id,
            asset_type: m.asset_type,
            name: m.name,
            sn: m.sn,
            status: m.status,
            manage_ip: m.manage_ip,
            memo: m.memo,
            price: m.price,
            purchase_day: m.purchase_day,
            expire_day: m.expire_day,
            business_unit_id: m.business_unit_id,
            manufacturer_id: m.manufacturer_id,
            idc_id: m.idc_id,
            contract_id: m.contract_id,
            admin_id: m.admin_id,
            approved_by_id: m.approved_by_id,
            tags: tags
                .into_iter()
                .map(|t| TagSummary {
                    id: t.id,
                    name: t.name,
                })
                .collect(),
            display_name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<asset::Model> for AssetListItem {
    fn from(m: asset::Model) -> Self {
        let display_name = m.display_name();
        Self {
            id: m.id,
            asset_type: m.asset_type,
            name: m.name,
            sn: m.sn,
            status: m.status,
            manage_ip: m.manage_ip,
            business_unit_id: m.business_unit_id,
            idc_id: m.idc_id,
            display_name,
            created_at: m.created_at,
        }
    }
}

fn validate_price(price: Option<f64>) -> Result<(), AppError> {
    if let Some(price) = price
        && (!price.is_finite() || price < 0.0)
    {
        return Err(AppError::Validation(
            "Price must be a non-negative number".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_asset(req: &CreateAssetRequest) -> Result<(), AppError> {
    validate_required(&req.name, "Name", NAME_MAX)?;
    validate_required(&req.sn, "Serial number", SN_MAX)?;
    validate_ip(req.manage_ip.as_deref(), "manage_ip")?;
    validate_price(req.price)?;
    validate_date_range(
        req.purchase_day,
        req.expire_day,
        "purchase_day",
        "expire_day",
    )?;
    validate_id_set(&req.tag_ids, "tag", MAX_TAGS)
}

/// Validate a PATCH body. Date ordering is checked against the merged record
/// by the handler, since only one side may be present here.
pub fn validate_update_asset(req: &UpdateAssetRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_required(name, "Name", NAME_MAX)?;
    }
    if let Some(ref sn) = req.sn {
        validate_required(sn, "Serial number", SN_MAX)?;
    }
    if let Some(ref ip) = req.manage_ip {
        validate_ip(ip.as_deref(), "manage_ip")?;
    }
    if let Some(price) = req.price {
        validate_price(price)?;
    }
    Ok(())
}

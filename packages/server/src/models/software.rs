use cmdb_common::SoftwareType;
use serde::{Deserialize, Serialize};

use crate::entity::software;
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::validate_required;

pub const VERSION_MAX: usize = 64;

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SoftwareListQuery {
    /// Page number (1-based). Default: 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Default: 20.
    pub per_page: Option<u64>,
    /// Filter by category key, e.g. `operating_system`.
    pub sub_asset_type: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSoftwareRequest {
    /// Defaults to `operating_system`.
    pub sub_asset_type: Option<SoftwareType>,
    /// Number of purchased licenses. Defaults to 1.
    pub license_num: Option<i32>,
    #[schema(example = "RedHat release 7 (Final)")]
    pub version: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateSoftwareRequest {
    pub sub_asset_type: Option<SoftwareType>,
    pub license_num: Option<i32>,
    pub version: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SoftwareResponse {
    pub id: i32,
    pub sub_asset_type: SoftwareType,
    pub license_num: i32,
    pub version: String,
    /// `{type label}--{version}`
    #[schema(example = "操作系统--RedHat release 7 (Final)")]
    pub display_name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SoftwareListResponse {
    pub data: Vec<SoftwareResponse>,
    pub pagination: Pagination,
}

impl From<software::Model> for SoftwareResponse {
    fn from(m: software::Model) -> Self {
        let display_name = m.display_name();
        Self {
            id: m.id,
            sub_asset_type: m.sub_asset_type,
            license_num: m.license_num,
            version: m.version,
            display_name,
        }
    }
}

fn validate_license_num(n: i32) -> Result<(), AppError> {
    if n < 0 {
        return Err(AppError::Validation("License count must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_create_software(req: &CreateSoftwareRequest) -> Result<(), AppError> {
    validate_required(&req.version, "Version", VERSION_MAX)?;
    if let Some(n) = req.license_num {
        validate_license_num(n)?;
    }
    Ok(())
}

pub fn validate_update_software(req: &UpdateSoftwareRequest) -> Result<(), AppError> {
    if let Some(ref version) = req.version {
        validate_required(version, "Version", VERSION_MAX)?;
    }
    if let Some(n) = req.license_num {
        validate_license_num(n)?;
    }
    Ok(())
}

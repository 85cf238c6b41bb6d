//! Request and response bodies for the per-category asset sub-records.

use cmdb_common::{CreatedBy, NetworkDeviceType, SecurityDeviceType, ServerType, StorageDeviceType};
use serde::{Deserialize, Serialize};

use crate::entity::{asset, network_device, security_device, server, storage_device};
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{double_option, validate_ip, validate_optional};

const MODEL_MAX: usize = 128;

/// List query shared by all device categories.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeviceListQuery {
    /// Page number (1-based). Default: 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Default: 20.
    pub per_page: Option<u64>,
    /// Filter by category key, e.g. `pc_server` or `switch`.
    pub sub_asset_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateServerRequest {
    pub asset_id: i32,
    /// Defaults to `pc_server`.
    pub sub_asset_type: Option<ServerType>,
    /// Defaults to `auto`.
    pub created_by: Option<CreatedBy>,
    /// Host server ID when this record describes a virtual machine.
    pub hosted_on_id: Option<i32>,
    #[schema(example = "R730")]
    pub model: Option<String>,
    pub raid_type: Option<String>,
    pub os_type: Option<String>,
    pub os_distribution: Option<String>,
    pub os_release: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateServerRequest {
    pub sub_asset_type: Option<ServerType>,
    pub created_by: Option<CreatedBy>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub hosted_on_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub raid_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub os_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub os_distribution: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub os_release: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ServerResponse {
    pub id: i32,
    pub asset_id: i32,
    pub sub_asset_type: ServerType,
    pub created_by: CreatedBy,
    pub hosted_on_id: Option<i32>,
    pub model: Option<String>,
    pub raid_type: Option<String>,
    pub os_type: Option<String>,
    pub os_distribution: Option<String>,
    pub os_release: Option<String>,
    #[schema(example = "db01--PC服务器--R730 <sn:SN123>")]
    pub display_name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ServerListResponse {
    pub data: Vec<ServerResponse>,
    pub pagination: Pagination,
}

impl ServerResponse {
    pub fn new(m: server::Model, asset: &asset::Model) -> Self {
        let display_name =
            asset.device_display_name(m.sub_asset_type, m.model.as_deref().unwrap_or_default());
        Self {
            id: m.id,
            asset_id: m.asset_id,
            sub_asset_type: m.sub_asset_type,
            created_by: m.created_by,
            hosted_on_id: m.hosted_on_id,
            model: m.model,
            raid_type: m.raid_type,
            os_type: m.os_type,
            os_distribution: m.os_distribution,
            os_release: m.os_release,
            display_name,
        }
    }
}

pub fn validate_create_server(req: &CreateServerRequest) -> Result<(), AppError> {
    validate_optional(req.model.as_deref(), "Model", MODEL_MAX)?;
    validate_optional(req.raid_type.as_deref(), "RAID type", 512)?;
    validate_optional(req.os_type.as_deref(), "OS type", 64)?;
    validate_optional(req.os_distribution.as_deref(), "OS distribution", 64)?;
    validate_optional(req.os_release.as_deref(), "OS release", 64)
}

pub fn validate_update_server(req: &UpdateServerRequest) -> Result<(), AppError> {
    fn flatten(v: &Option<Option<String>>) -> Option<&str> {
        v.as_ref().and_then(|v| v.as_deref())
    }
    validate_optional(flatten(&req.model), "Model", MODEL_MAX)?;
    validate_optional(flatten(&req.raid_type), "RAID type", 512)?;
    validate_optional(flatten(&req.os_type), "OS type", 64)?;
    validate_optional(flatten(&req.os_distribution), "OS distribution", 64)?;
    validate_optional(flatten(&req.os_release), "OS release", 64)
}

// ---------------------------------------------------------------------------
// Network device
// ---------------------------------------------------------------------------

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateNetworkDeviceRequest {
    pub asset_id: i32,
    /// Defaults to `router`.
    pub sub_asset_type: Option<NetworkDeviceType>,
    pub vlan_ip: Option<String>,
    pub intranet_ip: Option<String>,
    /// Defaults to `未知型号`.
    pub model: Option<String>,
    pub firmware: Option<String>,
    pub port_num: Option<i16>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateNetworkDeviceRequest {
    pub sub_asset_type: Option<NetworkDeviceType>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub vlan_ip: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub intranet_ip: Option<Option<String>>,
    pub model: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub firmware: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i16>)]
    pub port_num: Option<Option<i16>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NetworkDeviceResponse {
    pub id: i32,
    pub asset_id: i32,
    pub sub_asset_type: NetworkDeviceType,
    pub vlan_ip: Option<String>,
    pub intranet_ip: Option<String>,
    pub model: String,
    pub firmware: Option<String>,
    pub port_num: Option<i16>,
    pub display_name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NetworkDeviceListResponse {
    pub data: Vec<NetworkDeviceResponse>,
    pub pagination: Pagination,
}

impl NetworkDeviceResponse {
    pub fn new(m: network_device::Model, asset: &asset::Model) -> Self {
        let display_name = asset.device_display_name(m.sub_asset_type, &m.model);
        Self {
            id: m.id,
            asset_id: m.asset_id,
            sub_asset_type: m.sub_asset_type,
            vlan_ip: m.vlan_ip,
            intranet_ip: m.intranet_ip,
            model: m.model,
            firmware: m.firmware,
            port_num: m.port_num,
            display_name,
        }
    }
}

fn validate_port_num(port_num: Option<i16>) -> Result<(), AppError> {
    if let Some(n) = port_num
        && n < 0
    {
        return Err(AppError::Validation("Port count must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_create_network_device(req: &CreateNetworkDeviceRequest) -> Result<(), AppError> {
    validate_ip(req.vlan_ip.as_deref(), "vlan_ip")?;
    validate_ip(req.intranet_ip.as_deref(), "intranet_ip")?;
    validate_model(req.model.as_deref())?;
    validate_optional(req.firmware.as_deref(), "Firmware", 128)?;
    validate_port_num(req.port_num)
}

pub fn validate_update_network_device(req: &UpdateNetworkDeviceRequest) -> Result<(), AppError> {
    if let Some(ref ip) = req.vlan_ip {
        validate_ip(ip.as_deref(), "vlan_ip")?;
    }
    if let Some(ref ip) = req.intranet_ip {
        validate_ip(ip.as_deref(), "intranet_ip")?;
    }
    validate_model(req.model.as_deref())?;
    if let Some(Some(ref firmware)) = req.firmware {
        validate_optional(Some(firmware), "Firmware", 128)?;
    }
    if let Some(port_num) = req.port_num {
        validate_port_num(port_num)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Storage and security devices share one shape: sub-type plus model.
// ---------------------------------------------------------------------------

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateStorageDeviceRequest {
    pub asset_id: i32,
    /// Defaults to `disk_array`.
    pub sub_asset_type: Option<StorageDeviceType>,
    /// Defaults to `未知设备`.
    pub model: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateStorageDeviceRequest {
    pub sub_asset_type: Option<StorageDeviceType>,
    pub model: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StorageDeviceResponse {
    pub id: i32,
    pub asset_id: i32,
    pub sub_asset_type: StorageDeviceType,
    pub model: String,
    /// `{asset name}--{type label}{model}id:{id}`
    #[schema(example = "san01--磁盘阵列未知设备id:4")]
    pub display_name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StorageDeviceListResponse {
    pub data: Vec<StorageDeviceResponse>,
    pub pagination: Pagination,
}

impl StorageDeviceResponse {
    pub fn new(m: storage_device::Model, asset: &asset::Model) -> Self {
        let display_name = asset.record_display_name(m.sub_asset_type, &m.model, m.id);
        Self {
            id: m.id,
            asset_id: m.asset_id,
            sub_asset_type: m.sub_asset_type,
            model: m.model,
            display_name,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSecurityDeviceRequest {
    pub asset_id: i32,
    /// Defaults to `firewall`.
    pub sub_asset_type: Option<SecurityDeviceType>,
    /// Defaults to `未知型号`.
    pub model: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateSecurityDeviceRequest {
    pub sub_asset_type: Option<SecurityDeviceType>,
    pub model: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SecurityDeviceResponse {
    pub id: i32,
    pub asset_id: i32,
    pub sub_asset_type: SecurityDeviceType,
    pub model: String,
    /// `{asset name}--{type label}{model}id:{id}`
    #[schema(example = "fw01--防火墙未知型号id:3")]
    pub display_name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SecurityDeviceListResponse {
    pub data: Vec<SecurityDeviceResponse>,
    pub pagination: Pagination,
}

impl SecurityDeviceResponse {
    pub fn new(m: security_device::Model, asset: &asset::Model) -> Self {
        let display_name = asset.record_display_name(m.sub_asset_type, &m.model, m.id);
        Self {
            id: m.id,
            asset_id: m.asset_id,
            sub_asset_type: m.sub_asset_type,
            model: m.model,
            display_name,
        }
    }
}

/// Validate a model name on create or update. Blank values are allowed and
/// resolve to the category default through [`model_or_default`].
pub fn validate_model(model: Option<&str>) -> Result<(), AppError> {
    validate_optional(model, "Model", MODEL_MAX)
}

/// Resolve the stored model name, falling back to the category default.
pub fn model_or_default(model: Option<String>, default: &str) -> String {
    model
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default.to_string())
}

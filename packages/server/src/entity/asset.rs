use cmdb_common::{AssetStatus, AssetType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Columns shared by every managed asset.
///
/// Category-specific attributes live in the one-to-one sub-tables
/// (`server`, `network_device`, `storage_device`, `security_device`).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub asset_type: AssetType,
    #[sea_orm(unique, column_type = "String(StringLen::N(64))")]
    pub name: String,
    #[sea_orm(unique, column_type = "String(StringLen::N(128))")]
    pub sn: String,
    pub status: AssetStatus,

    /// IPv4 or IPv6, validated before insert.
    #[sea_orm(column_type = "String(StringLen::N(45))")]
    pub manage_ip: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub memo: Option<String>,

    pub price: Option<f64>,
    pub purchase_day: Option<Date>,
    pub expire_day: Option<Date>,

    pub business_unit_id: Option<i32>,
    #[sea_orm(belongs_to, from = "business_unit_id", to = "id", on_delete = "SetNull")]
    pub business_unit: HasOne<super::business_unit::Entity>,

    pub manufacturer_id: Option<i32>,
    #[sea_orm(belongs_to, from = "manufacturer_id", to = "id", on_delete = "SetNull")]
    pub manufacturer: HasOne<super::manufacturer::Entity>,

    pub idc_id: Option<i32>,
    #[sea_orm(belongs_to, from = "idc_id", to = "id", on_delete = "SetNull")]
    pub idc: HasOne<super::idc::Entity>,

    pub contract_id: Option<i32>,
    #[sea_orm(belongs_to, from = "contract_id", to = "id", on_delete = "SetNull")]
    pub contract: HasOne<super::contract::Entity>,

    pub admin_id: Option<i32>,
    #[sea_orm(
        belongs_to,
        relation_enum = "Admin",
        from = "admin_id",
        to = "id",
        on_delete = "SetNull"
    )]
    pub admin: HasOne<super::user::Entity>,

    pub approved_by_id: Option<i32>,
    #[sea_orm(
        belongs_to,
        relation_enum = "ApprovedBy",
        from = "approved_by_id",
        to = "id",
        on_delete = "SetNull"
    )]
    pub approved_by: HasOne<super::user::Entity>,

    #[sea_orm(has_many, via = "asset_tag")]
    pub tags: HasMany<super::tag::Entity>,

    #[sea_orm(has_one)]
    pub server: HasOne<super::server::Entity>,
    #[sea_orm(has_one)]
    pub network_device: HasOne<super::network_device::Entity>,
    #[sea_orm(has_one)]
    pub storage_device: HasOne<super::storage_device::Entity>,
    #[sea_orm(has_one)]
    pub security_device: HasOne<super::security_device::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Rendered as `<{type label}> {name}`.
    pub fn display_name(&self) -> String {
        format!("<{}> {}", self.asset_type.label(), self.name)
    }

    /// Display string of a category sub-record owned by this asset:
    /// `{name}--{sub type label}--{model} <sn:{sn}>`.
    pub fn device_display_name(&self, sub_type: impl std::fmt::Display, model: &str) -> String {
        format!("{}--{}--{} <sn:{}>", self.name, sub_type, model, self.sn)
    }

    /// Display string of a storage or security sub-record:
    /// `{name}--{sub type label}{model}id:{record id}`.
    pub fn record_display_name(
        &self,
        sub_type: impl std::fmt::Display,
        model: &str,
        record_id: i32,
    ) -> String {
        format!("{}--{}{}id:{}", self.name, sub_type, model, record_id)
    }
}

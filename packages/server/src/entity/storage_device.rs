use cmdb_common::StorageDeviceType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Model name stored when none is supplied.
pub const DEFAULT_MODEL: &str = "未知设备";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_device")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub asset_id: i32,
    #[sea_orm(belongs_to, from = "asset_id", to = "id", on_delete = "Cascade")]
    pub asset: HasOne<super::asset::Entity>,

    pub sub_asset_type: StorageDeviceType,
    #[sea_orm(column_type = "String(StringLen::N(128))", default_value = "未知设备")]
    pub model: String,
}

impl ActiveModelBehavior for ActiveModel {}

use cmdb_common::NetworkDeviceType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Model name stored when none is supplied.
pub const DEFAULT_MODEL: &str = "未知型号";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "network_device")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub asset_id: i32,
    #[sea_orm(belongs_to, from = "asset_id", to = "id", on_delete = "Cascade")]
    pub asset: HasOne<super::asset::Entity>,

    pub sub_asset_type: NetworkDeviceType,
    #[sea_orm(column_type = "String(StringLen::N(45))")]
    pub vlan_ip: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(45))")]
    pub intranet_ip: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(128))", default_value = "未知型号")]
    pub model: String,
    #[sea_orm(column_type = "String(StringLen::N(128))")]
    pub firmware: Option<String>,
    pub port_num: Option<i16>,
}

impl ActiveModelBehavior for ActiveModel {}

use cmdb_common::SoftwareType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A licensed software product. Not tied to a hardware asset.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "software")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub sub_asset_type: SoftwareType,
    #[sea_orm(default_value = 1)]
    pub license_num: i32,
    /// e.g. `RedHat release 7 (Final)`
    #[sea_orm(unique, column_type = "String(StringLen::N(64))")]
    pub version: String,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Rendered as `{type label}--{version}`.
    pub fn display_name(&self) -> String {
        format!("{}--{}", self.sub_asset_type.label(), self.version)
    }
}

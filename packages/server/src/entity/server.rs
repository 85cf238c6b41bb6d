use cmdb_common::{CreatedBy, ServerType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "server")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// At most one server record per asset.
    #[sea_orm(unique)]
    pub asset_id: i32,
    #[sea_orm(belongs_to, from = "asset_id", to = "id", on_delete = "Cascade")]
    pub asset: HasOne<super::asset::Entity>,

    pub sub_asset_type: ServerType,
    pub created_by: CreatedBy,

    /// Physical host of a virtual machine.
    pub hosted_on_id: Option<i32>,
    #[sea_orm(
        self_ref,
        relation_enum = "HostedOn",
        from = "hosted_on_id",
        to = "id",
        on_delete = "Cascade"
    )]
    pub hosted_on: HasOne<Entity>,

    #[sea_orm(column_type = "String(StringLen::N(128))")]
    pub model: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(512))")]
    pub raid_type: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub os_type: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub os_distribution: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub os_release: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}

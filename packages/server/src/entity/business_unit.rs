use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "business_unit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, column_type = "String(StringLen::N(64))")]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub memo: Option<String>,

    pub parent_unit_id: Option<i32>,
    #[sea_orm(
        self_ref,
        relation_enum = "ParentUnit",
        from = "parent_unit_id",
        to = "id",
        on_delete = "SetNull"
    )]
    pub parent_unit: HasOne<Entity>,

    #[sea_orm(has_many)]
    pub assets: HasMany<super::asset::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

pub mod asset;
pub mod catalog;
pub mod network_device;
pub mod security_device;
pub mod server;
pub mod software;
pub mod storage_device;

use sea_orm::*;

use crate::entity::asset as asset_entity;
use crate::error::AppError;
use crate::models::shared::Pagination;

/// Fetch one page of `select` together with pagination metadata.
pub(crate) async fn fetch_page<E, C>(
    db: &C,
    select: Select<E>,
    page: u64,
    per_page: u64,
) -> Result<(Vec<E::Model>, Pagination), DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let paginator = select.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let data = paginator.fetch_page(page - 1).await?;

    Ok((
        data,
        Pagination {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        },
    ))
}

pub(crate) async fn find_asset<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<asset_entity::Model, AppError> {
    asset_entity::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Asset not found".into()))
}

/// Parse a category filter key from a query string.
pub(crate) fn parse_sub_type<T>(key: Option<&str>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = cmdb_common::ParseChoiceError>,
{
    key.map(str::parse::<T>)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// Resolve the parent asset named in a create request.
pub(crate) async fn require_asset<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<asset_entity::Model, AppError> {
    asset_entity::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Validation(format!("Asset {id} does not exist")))
}

/// Load the parent assets of a page of sub-records, keyed by ID.
pub(crate) async fn assets_by_id<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<std::collections::HashMap<i32, asset_entity::Model>, AppError> {
    let ids: Vec<i32> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(Default::default());
    }
    Ok(asset_entity::Entity::find()
        .filter(asset_entity::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect())
}

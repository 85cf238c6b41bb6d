use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::asset;

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for the filtered asset list:
    // SELECT ... FROM asset WHERE asset_type = ? AND status = ? ORDER BY created_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_asset_type_status")
        .table(asset::Entity)
        .col(asset::Column::AssetType)
        .col(asset::Column::Status)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_asset_type_status exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_asset_type_status: {}", e);
        }
    }

    let stmt = Index::create()
        .if_not_exists()
        .name("idx_asset_created_at")
        .table(asset::Entity)
        .col(asset::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_asset_created_at exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_asset_created_at: {}", e);
        }
    }

    Ok(())
}

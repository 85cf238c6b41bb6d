pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;

use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CMDB Asset API",
        version = "1.0.0",
        description = "Catalog of IT assets: servers, network, storage and security devices, and licensed software"
    ),
    tags(
        (name = "Assets", description = "Shared asset records"),
        (name = "Servers", description = "Server details attached to an asset"),
        (name = "Network Devices", description = "Network device details attached to an asset"),
        (name = "Storage Devices", description = "Storage device details attached to an asset"),
        (name = "Security Devices", description = "Security device details attached to an asset"),
        (name = "Software", description = "Licensed software catalog"),
        (name = "Business Units", description = "Owning business lines"),
        (name = "Manufacturers", description = "Hardware vendors"),
        (name = "IDCs", description = "Data centers"),
        (name = "Contracts", description = "Purchase and maintenance contracts"),
        (name = "Tags", description = "Free-form asset labels"),
        (name = "Users", description = "Asset administrators and approvers"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config))
        .split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}

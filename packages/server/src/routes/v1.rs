use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/assets", asset_routes())
        .nest("/servers", server_routes())
        .nest("/network-devices", network_device_routes())
        .nest("/storage-devices", storage_device_routes())
        .nest("/security-devices", security_device_routes())
        .nest("/software", software_routes())
        .nest("/business-units", business_unit_routes())
        .nest("/manufacturers", manufacturer_routes())
        .nest("/idcs", idc_routes())
        .nest("/contracts", contract_routes())
        .nest("/tags", tag_routes())
        .nest("/users", user_routes())
}

fn asset_routes() -> OpenApiRouter<AppState> {
    use handlers::asset::*;

    OpenApiRouter::new()
        .routes(routes!(list_assets, create_asset))
        .routes(routes!(get_asset, update_asset, delete_asset))
        .routes(routes!(set_asset_tags))
}

fn server_routes() -> OpenApiRouter<AppState> {
    use handlers::server::*;

    OpenApiRouter::new()
        .routes(routes!(list_servers, create_server))
        .routes(routes!(get_server, update_server, delete_server))
}

fn network_device_routes() -> OpenApiRouter<AppState> {
    use handlers::network_device::*;

    OpenApiRouter::new()
        .routes(routes!(list_network_devices, create_network_device))
        .routes(routes!(
            get_network_device,
            update_network_device,
            delete_network_device
        ))
}

fn storage_device_routes() -> OpenApiRouter<AppState> {
    use handlers::storage_device::*;

    OpenApiRouter::new()
        .routes(routes!(list_storage_devices, create_storage_device))
        .routes(routes!(
            get_storage_device,
            update_storage_device,
            delete_storage_device
        ))
}

fn security_device_routes() -> OpenApiRouter<AppState> {
    use handlers::security_device::*;

    OpenApiRouter::new()
        .routes(routes!(list_security_devices, create_security_device))
        .routes(routes!(
            get_security_device,
            update_security_device,
            delete_security_device
        ))
}

fn software_routes() -> OpenApiRouter<AppState> {
    use handlers::software::*;

    OpenApiRouter::new()
        .routes(routes!(list_software, create_software))
        .routes(routes!(get_software, update_software, delete_software))
}

fn business_unit_routes() -> OpenApiRouter<AppState> {
    use handlers::catalog::*;

    OpenApiRouter::new()
        .routes(routes!(list_business_units, create_business_unit))
        .routes(routes!(get_business_unit, delete_business_unit))
}

fn manufacturer_routes() -> OpenApiRouter<AppState> {
    use handlers::catalog::*;

    OpenApiRouter::new()
        .routes(routes!(list_manufacturers, create_manufacturer))
        .routes(routes!(get_manufacturer, delete_manufacturer))
}

fn idc_routes() -> OpenApiRouter<AppState> {
    use handlers::catalog::*;

    OpenApiRouter::new()
        .routes(routes!(list_idcs, create_idc))
        .routes(routes!(get_idc, delete_idc))
}

fn contract_routes() -> OpenApiRouter<AppState> {
    use handlers::catalog::*;

    OpenApiRouter::new()
        .routes(routes!(list_contracts, create_contract))
        .routes(routes!(get_contract, delete_contract))
}

fn tag_routes() -> OpenApiRouter<AppState> {
    use handlers::catalog::*;

    OpenApiRouter::new()
        .routes(routes!(list_tags, create_tag))
        .routes(routes!(get_tag, delete_tag))
}

fn user_routes() -> OpenApiRouter<AppState> {
    use handlers::catalog::*;

    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, delete_user))
}

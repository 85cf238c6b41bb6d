pub mod asset;
pub mod asset_tag;
pub mod business_unit;
pub mod contract;
pub mod idc;
pub mod manufacturer;
pub mod network_device;
pub mod security_device;
pub mod server;
pub mod software;
pub mod storage_device;
pub mod tag;
pub mod user;

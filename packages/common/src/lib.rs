pub mod asset_status;
pub mod asset_type;
pub mod choice;
pub mod sub_type;

pub use asset_status::AssetStatus;
pub use asset_type::{AssetType, CreatedBy};
pub use choice::ParseChoiceError;
pub use sub_type::{
    NetworkDeviceType, SecurityDeviceType, ServerType, SoftwareType, StorageDeviceType,
};

pub mod asset;
pub mod catalog;
pub mod device;
pub mod shared;
pub mod software;

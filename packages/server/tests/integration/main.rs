mod asset;
mod common;
mod device;
mod software;

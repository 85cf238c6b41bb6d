#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::choice::ParseChoiceError;

/// Broad category of an asset.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::N(64))")
)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "server"))]
    Server,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "networkdevice"))]
    NetworkDevice,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "storagedevice"))]
    StorageDevice,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "securitydevice"))]
    SecurityDevice,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "software"))]
    Software,
}

impl AssetType {
    pub const ALL: &'static [AssetType] = &[
        Self::Server,
        Self::NetworkDevice,
        Self::StorageDevice,
        Self::SecurityDevice,
        Self::Software,
    ];

    /// Returns the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::NetworkDevice => "networkdevice",
            Self::StorageDevice => "storagedevice",
            Self::SecurityDevice => "securitydevice",
            Self::Software => "software",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Server => "服务器",
            Self::NetworkDevice => "网络设备",
            Self::StorageDevice => "存储设备",
            Self::SecurityDevice => "安全设备",
            Self::Software => "软件资产",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetType {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "server" => Ok(Self::Server),
            "networkdevice" => Ok(Self::NetworkDevice),
            "storagedevice" => Ok(Self::StorageDevice),
            "securitydevice" => Ok(Self::SecurityDevice),
            "software" => Ok(Self::Software),
            _ => Err(ParseChoiceError::new(
                "AssetType",
                s,
                Self::ALL.iter().map(|t| t.as_str()),
            )),
        }
    }
}

/// How a server record entered the catalog.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")
)]
#[serde(rename_all = "lowercase")]
pub enum CreatedBy {
    /// Reported by a collection agent.
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "auto"))]
    Auto,
    /// Entered by hand.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "manual"))]
    Manual,
}

impl CreatedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Auto => "自动添加",
            Self::Manual => "手工录入",
        }
    }
}

impl fmt::Display for CreatedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

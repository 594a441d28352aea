//! Device and board records as delivered by the device inventory.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PackId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack: Option<PackId>,
}

impl DeviceRecord {
    pub fn new(name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vendor: vendor.into(),
            pack: None,
        }
    }
}

impl fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vendor.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}::{}", self.vendor, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub name: String,
    #[serde(default)]
    pub vendor: String,
    /// Device soldered onto the board, used when no device is given explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounted_device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack: Option<PackId>,
}

impl BoardRecord {
    pub fn new(name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vendor: vendor.into(),
            mounted_device: None,
            pack: None,
        }
    }

    pub fn with_mounted_device(mut self, device: impl Into<String>) -> Self {
        self.mounted_device = Some(device.into());
        self
    }
}

impl fmt::Display for BoardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vendor.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}::{}", self.vendor, self.name)
        }
    }
}

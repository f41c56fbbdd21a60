//! Delivery partner types.
//!
//! The same enumeration tags videos, keys mandatory tracks, and filters
//! analytics. Adding a partner means adding a variant here and nowhere else.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Category of delivery partner a rider works for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum DeliveryType {
    Amazon,
    Bluedart,
    Delhivery,
    Swiggy,
    Zomato,
}

impl DeliveryType {
    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryType::Amazon => "Amazon",
            DeliveryType::Bluedart => "BlueDart",
            DeliveryType::Delhivery => "Delhivery",
            DeliveryType::Swiggy => "Swiggy",
            DeliveryType::Zomato => "Zomato",
        }
    }

    /// Every delivery type, in declaration order.
    pub fn all() -> Vec<DeliveryType> {
        DeliveryType::iter().collect()
    }
}

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency amount charged for one night, in the hotel's currency units.
pub type Price = u32;

/// Exposes the amount charged for an entity.
pub trait Priced {
    fn price(&self) -> Price;
}

/// Category of a bookable room. Classes only drive filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoomClass {
    Single,
    Double,
}

impl RoomClass {
    pub const ALL: [RoomClass; 2] = [RoomClass::Single, RoomClass::Double];

    pub fn label(&self) -> &'static str {
        match self {
            RoomClass::Single => "single",
            RoomClass::Double => "double",
        }
    }
}

impl fmt::Display for RoomClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown room class `{0}` (expected `single` or `double`)")]
pub struct ParseRoomClassError(pub String);

impl FromStr for RoomClass {
    type Err = ParseRoomClassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" | "s" => Ok(RoomClass::Single),
            "double" | "d" => Ok(RoomClass::Double),
            other => Err(ParseRoomClassError(other.to_string())),
        }
    }
}

/// A bookable room in a hotel's catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub class: RoomClass,
    pub number: u32,
    pub price: Price,
}

impl Room {
    pub fn new(class: RoomClass, price: Price, number: u32) -> Self {
        Self {
            class,
            number,
            price,
        }
    }

    pub fn single(price: Price, number: u32) -> Self {
        Self::new(RoomClass::Single, price, number)
    }

    pub fn double(price: Price, number: u32) -> Self {
        Self::new(RoomClass::Double, price, number)
    }
}

impl Priced for Room {
    fn price(&self) -> Price {
        self.price
    }
}

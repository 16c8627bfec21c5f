//! Shared primitive IDs and the vehicle category enum.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FareError;

/// Physical parking spot number.
pub type SpotId = u32;
/// Monotonic ticket identifier.
pub type TicketId = u64;

/// Vehicle category; decides both the spot kind and the hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleType {
    /// Passenger car.
    Car,
    /// Two-wheeler.
    Bike,
}

impl VehicleType {
    /// Every known category, in selector order.
    pub const ALL: [VehicleType; 2] = [VehicleType::Car, VehicleType::Bike];

    /// Maps an operator menu selection (`1` car, `2` bike).
    pub fn from_selection(selection: i32) -> Option<Self> {
        match selection {
            1 => Some(Self::Car),
            2 => Some(Self::Bike),
            _ => None,
        }
    }

    /// Menu selection code for this category.
    pub fn selection(self) -> i32 {
        match self {
            Self::Car => 1,
            Self::Bike => 2,
        }
    }

    /// Stored text code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Car => "CAR",
            Self::Bike => "BIKE",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.eq_ignore_ascii_case("CAR") {
            Ok(Self::Car)
        } else if code.eq_ignore_ascii_case("BIKE") {
            Ok(Self::Bike)
        } else {
            Err(FareError::UnknownVehicleType(code.to_string()))
        }
    }
}

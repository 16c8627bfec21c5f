//! Parking spot record.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::types::{SpotId, VehicleType};

/// A single physical parking location.
///
/// Identity is the spot number: two handles with the same `id` compare equal
/// even if one of them carries a stale availability flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingSpot {
    /// Spot number, unique within the facility.
    pub id: SpotId,
    /// Category of vehicle the spot accepts.
    pub vehicle_type: VehicleType,
    /// False while a vehicle occupies the spot.
    pub is_available: bool,
}

impl ParkingSpot {
    /// Creates a spot handle.
    pub fn new(id: SpotId, vehicle_type: VehicleType, is_available: bool) -> Self {
        Self {
            id,
            vehicle_type,
            is_available,
        }
    }
}

impl PartialEq for ParkingSpot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParkingSpot {}

impl Hash for ParkingSpot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

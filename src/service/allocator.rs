//! Spot allocation against a [`SpotRegistry`].

use crate::{registry::SpotRegistry, spot::ParkingSpot, types::VehicleType};

/// Next free spot for `vehicle_type`, or `None` when the facility is full.
///
/// A registry failure is logged and treated as "no spot". The spot is not
/// reserved; the caller marks it unavailable once the entry goes through.
pub fn next_available_spot<R>(registry: &R, vehicle_type: VehicleType) -> Option<ParkingSpot>
where
    R: SpotRegistry + ?Sized,
{
    match registry.next_available_slot(vehicle_type) {
        Ok(Some(id)) if id > 0 => Some(ParkingSpot::new(id, vehicle_type, true)),
        Ok(_) => {
            tracing::warn!(%vehicle_type, "Parking slots might be full");
            None
        }
        Err(e) => {
            tracing::error!(%vehicle_type, error = %e, "Error fetching next available parking slot");
            None
        }
    }
}

/// Like [`next_available_spot`], keyed by an operator menu selection.
///
/// Unknown selections are reported as incorrect input and never reach the
/// registry.
pub fn next_available_spot_for_selection<R>(registry: &R, selection: i32) -> Option<ParkingSpot>
where
    R: SpotRegistry + ?Sized,
{
    let Some(vehicle_type) = VehicleType::from_selection(selection) else {
        tracing::warn!(selection, "Incorrect input provided");
        return None;
    };
    next_available_spot(registry, vehicle_type)
}

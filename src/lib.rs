//! Parking spot allocation and fare calculation over pluggable collaborators.
//!
//! # Examples
//!
//! Pricing a closed ticket with [`service::fare::FareCalculator`]:
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use parkfare::{
//!     registry::memory::TicketLedger,
//!     service::fare::FareCalculator,
//!     spot::ParkingSpot,
//!     ticket::TicketDraft,
//!     types::VehicleType,
//! };
//!
//! let in_time = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
//! let mut ticket = TicketDraft {
//!     vehicle_reg_number: "ABCDEF".to_string(),
//!     parking_spot: ParkingSpot::new(1, VehicleType::Car, false),
//!     in_time,
//! }
//! .into_ticket(1);
//! ticket.out_time = Some(in_time + Duration::minutes(30));
//!
//! FareCalculator::default()
//!     .calculate_fare(&mut ticket, &TicketLedger::new())
//!     .expect("fare");
//! assert_eq!(ticket.price, Some(0.75));
//! ```
//!
//! Running the entry/exit workflow against in-memory collaborators:
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use parkfare::{
//!     registry::memory::{SpotTable, TicketLedger},
//!     service::{input::ScriptedInput, parking::ParkingService},
//!     types::VehicleType,
//! };
//!
//! let spots = SpotTable::with_spots([(1, VehicleType::Car), (2, VehicleType::Bike)]).expect("spots");
//! let input = ScriptedInput::new()
//!     .selection(2)
//!     .registration("BIKE-42")
//!     .registration("BIKE-42");
//! let mut service = ParkingService::new(spots, TicketLedger::new(), input);
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
//! let parked = service.process_incoming_vehicle_at(t0).expect("enter");
//! assert_eq!(parked.parking_spot.id, 2);
//!
//! let left = service
//!     .process_exiting_vehicle_at(t0 + Duration::minutes(15))
//!     .expect("exit");
//! assert_eq!(left.price, Some(0.25));
//! ```
#![deny(missing_docs)]

/// Pricing errors.
pub mod error;
/// Collaborator traits and in-memory implementations.
pub mod registry;
/// Spot allocation, fare calculation, and orchestration.
pub mod service;
/// Parking spot record.
pub mod spot;
/// Ticket record and lifecycle.
pub mod ticket;
/// Shared primitive types and enums.
pub mod types;

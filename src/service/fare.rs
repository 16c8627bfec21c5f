//! Fare calculation over a closed ticket.

use serde::{Deserialize, Serialize};

use crate::{
    error::{FareError, FareResult},
    registry::SessionStore,
    ticket::Ticket,
    types::VehicleType,
};

/// Hourly rate charged for cars.
pub const CAR_RATE_PER_HOUR: f64 = 1.5;
/// Hourly rate charged for bikes.
pub const BIKE_RATE_PER_HOUR: f64 = 1.0;

/// Rate table and pricing constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    /// Hourly rate for cars.
    pub car_rate_per_hour: f64,
    /// Hourly rate for bikes.
    pub bike_rate_per_hour: f64,
    /// Stays longer than this many hours are priced at zero duration.
    pub threshold_hours: f64,
    /// Multiplier applied to returning customers.
    pub loyalty_factor: f64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            car_rate_per_hour: CAR_RATE_PER_HOUR,
            bike_rate_per_hour: BIKE_RATE_PER_HOUR,
            threshold_hours: 0.5,
            loyalty_factor: 0.95,
        }
    }
}

impl FareConfig {
    /// Hourly rate for `vehicle_type`.
    pub fn rate_for(&self, vehicle_type: VehicleType) -> f64 {
        match vehicle_type {
            VehicleType::Car => self.car_rate_per_hour,
            VehicleType::Bike => self.bike_rate_per_hour,
        }
    }
}

/// Prices closed tickets.
#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    config: FareConfig,
}

impl FareCalculator {
    /// Calculator over a custom rate table.
    pub fn new(config: FareConfig) -> Self {
        Self { config }
    }

    /// Rate table in use.
    pub fn config(&self) -> &FareConfig {
        &self.config
    }

    /// Computes and stores `ticket.price`.
    ///
    /// `history` decides the loyalty discount: any completed session for the
    /// same registration makes the ticket eligible. On error the ticket is left
    /// untouched.
    ///
    /// Stays longer than [`FareConfig::threshold_hours`] are priced as zero
    /// hours, not capped at the threshold.
    pub fn calculate_fare<S>(&self, ticket: &mut Ticket, history: &S) -> FareResult<()>
    where
        S: SessionStore + ?Sized,
    {
        let out_time = match ticket.out_time {
            Some(out) if out >= ticket.in_time => out,
            other => {
                return Err(FareError::InvalidTimeRange {
                    in_time: ticket.in_time,
                    out_time: other,
                });
            }
        };

        let minutes = (out_time - ticket.in_time).num_minutes();
        let duration_hours = minutes as f64 / 60.0;
        let rate = self.config.rate_for(ticket.vehicle_type());

        let billed_hours = if duration_hours > self.config.threshold_hours {
            0.0
        } else {
            duration_hours
        };
        let mut price = billed_hours * rate;

        let prior = history.count_prior_sessions(&ticket.vehicle_reg_number)?;
        let discounted = prior > 0;
        if discounted {
            price *= self.config.loyalty_factor;
        }

        tracing::debug!(
            ticket_id = ticket.id,
            vehicle_type = %ticket.vehicle_type(),
            minutes,
            rate,
            prior_sessions = prior,
            discounted,
            price,
            "Fare calculated"
        );

        ticket.price = Some(price);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::{
        registry::{StoreError, StoreResult},
        spot::ParkingSpot,
        ticket::TicketDraft,
    };

    struct PriorSessions(u32);

    impl SessionStore for PriorSessions {
        fn count_prior_sessions(&self, _reg_number: &str) -> StoreResult<u32> {
            Ok(self.0)
        }

        fn save_ticket(&mut self, _draft: TicketDraft) -> StoreResult<Ticket> {
            Err(StoreError::Message("read-only".to_string()))
        }

        fn open_ticket(&self, _reg_number: &str) -> StoreResult<Option<Ticket>> {
            Ok(None)
        }

        fn update_ticket(&mut self, ticket: &Ticket) -> StoreResult<()> {
            Err(StoreError::MissingTicket(ticket.id))
        }
    }

    struct BrokenHistory;

    impl SessionStore for BrokenHistory {
        fn count_prior_sessions(&self, _reg_number: &str) -> StoreResult<u32> {
            Err(StoreError::Message("connection lost".to_string()))
        }

        fn save_ticket(&mut self, _draft: TicketDraft) -> StoreResult<Ticket> {
            Err(StoreError::Message("connection lost".to_string()))
        }

        fn open_ticket(&self, _reg_number: &str) -> StoreResult<Option<Ticket>> {
            Err(StoreError::Message("connection lost".to_string()))
        }

        fn update_ticket(&mut self, _ticket: &Ticket) -> StoreResult<()> {
            Err(StoreError::Message("connection lost".to_string()))
        }
    }

    fn entry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    fn ticket(vehicle_type: VehicleType, minutes: Option<i64>) -> Ticket {
        let mut t = TicketDraft {
            vehicle_reg_number: "ABCDEF".to_string(),
            parking_spot: ParkingSpot::new(1, vehicle_type, false),
            in_time: entry(),
        }
        .into_ticket(1);
        t.out_time = minutes.map(|m| entry() + Duration::minutes(m));
        t
    }

    #[test]
    fn half_hour_car_is_priced() {
        let mut t = ticket(VehicleType::Car, Some(30));
        FareCalculator::default()
            .calculate_fare(&mut t, &PriorSessions(0))
            .unwrap();
        assert!((t.price.unwrap() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn car_over_threshold_costs_nothing() {
        let mut t = ticket(VehicleType::Car, Some(45));
        FareCalculator::default()
            .calculate_fare(&mut t, &PriorSessions(0))
            .unwrap();
        assert_eq!(t.price, Some(0.0));
    }

    #[test]
    fn returning_bike_gets_discount() {
        let mut t = ticket(VehicleType::Bike, Some(20));
        FareCalculator::default()
            .calculate_fare(&mut t, &PriorSessions(3))
            .unwrap();
        let expected = 20.0 / 60.0 * BIKE_RATE_PER_HOUR * 0.95;
        assert!((t.price.unwrap() - expected).abs() < 1e-9);
        assert!((t.price.unwrap() - 0.3167).abs() < 1e-4);
    }

    #[test]
    fn partial_minutes_are_truncated() {
        let mut t = ticket(VehicleType::Car, Some(10));
        t.out_time = t.out_time.map(|out| out + Duration::seconds(59));
        FareCalculator::default()
            .calculate_fare(&mut t, &PriorSessions(0))
            .unwrap();
        assert!((t.price.unwrap() - 10.0 / 60.0 * CAR_RATE_PER_HOUR).abs() < 1e-9);
    }

    #[test]
    fn missing_exit_is_rejected() {
        let mut t = ticket(VehicleType::Car, None);
        let err = FareCalculator::default()
            .calculate_fare(&mut t, &PriorSessions(0))
            .unwrap_err();
        assert!(matches!(err, FareError::InvalidTimeRange { out_time: None, .. }));
        assert_eq!(t.price, None);
    }

    #[test]
    fn exit_before_entry_is_rejected() {
        let mut t = ticket(VehicleType::Bike, Some(-5));
        let err = FareCalculator::default()
            .calculate_fare(&mut t, &PriorSessions(1))
            .unwrap_err();
        assert!(matches!(err, FareError::InvalidTimeRange { out_time: Some(_), .. }));
        assert_eq!(t.price, None);
    }

    #[test]
    fn history_failure_leaves_price_unset() {
        let mut t = ticket(VehicleType::Car, Some(15));
        let err = FareCalculator::default()
            .calculate_fare(&mut t, &BrokenHistory)
            .unwrap_err();
        assert!(matches!(err, FareError::History(StoreError::Message(_))));
        assert_eq!(t.price, None);
    }

    #[test]
    fn custom_rates_are_used() {
        let calc = FareCalculator::new(FareConfig {
            car_rate_per_hour: 6.0,
            ..FareConfig::default()
        });
        let mut t = ticket(VehicleType::Car, Some(30));
        calc.calculate_fare(&mut t, &PriorSessions(0)).unwrap();
        assert!((t.price.unwrap() - 3.0).abs() < 1e-9);
        assert_eq!(calc.config().rate_for(VehicleType::Car), 6.0);
        assert_eq!(calc.config().rate_for(VehicleType::Bike), BIKE_RATE_PER_HOUR);
    }
}

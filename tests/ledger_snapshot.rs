use chrono::{Duration, TimeZone, Utc};

use parkfare::{
    registry::{
        memory::{LedgerSnapshotV1, TicketLedger},
        SessionStore, StoreError,
    },
    service::fare::FareConfig,
    spot::ParkingSpot,
    ticket::TicketDraft,
    types::VehicleType,
};

fn draft(reg: &str, spot: u32, vehicle_type: VehicleType) -> TicketDraft {
    TicketDraft {
        vehicle_reg_number: reg.to_string(),
        parking_spot: ParkingSpot::new(spot, vehicle_type, false),
        in_time: Utc.with_ymd_and_hms(2024, 4, 9, 18, 0, 0).unwrap(),
    }
}

#[test]
fn snapshot_restores_history_and_id_sequence() {
    let mut ledger = TicketLedger::new();
    let mut done = ledger.save_ticket(draft("CAR-1", 1, VehicleType::Car)).expect("save");
    done.out_time = Some(done.in_time + Duration::minutes(25));
    done.price = Some(0.625);
    ledger.update_ticket(&done).expect("update");
    ledger.save_ticket(draft("BIKE-1", 4, VehicleType::Bike)).expect("save");

    let json = serde_json::to_string(&ledger.export_snapshot()).expect("encode");
    assert!(json.contains("\"vehicle_type\":\"BIKE\""));
    let snapshot: LedgerSnapshotV1 = serde_json::from_str(&json).expect("decode");
    let mut restored = TicketLedger::from_snapshot(snapshot).expect("restore");

    assert_eq!(restored.export_snapshot(), ledger.export_snapshot());
    assert_eq!(restored.count_prior_sessions("CAR-1").expect("count"), 1);
    assert_eq!(restored.get(1).and_then(|t| t.price), Some(0.625));
    assert!(restored.get(3).is_none());
    assert!(restored.open_ticket("BIKE-1").expect("open").is_some());

    let next = restored.save_ticket(draft("CAR-2", 2, VehicleType::Car)).expect("save");
    assert_eq!(next.id, 3);
}

#[test]
fn snapshot_with_duplicate_ids_is_rejected() {
    let ticket = draft("CAR-1", 1, VehicleType::Car).into_ticket(1);
    let snapshot = LedgerSnapshotV1 {
        next_ticket_id: 2,
        tickets: vec![ticket.clone(), ticket],
    };
    assert_eq!(
        TicketLedger::from_snapshot(snapshot).unwrap_err(),
        StoreError::AlreadyExists(1)
    );
}

#[test]
fn fare_config_fills_missing_fields_with_defaults() {
    let config: FareConfig = serde_json::from_str(r#"{"car_rate_per_hour": 2.0}"#).expect("decode");
    assert_eq!(config.car_rate_per_hour, 2.0);
    assert_eq!(config.bike_rate_per_hour, FareConfig::default().bike_rate_per_hour);
    assert_eq!(config.threshold_hours, 0.5);
    assert_eq!(config.loyalty_factor, 0.95);
}

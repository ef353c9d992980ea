//! Concurrent access through the shared handle

use std::collections::HashSet;
use std::thread;

use chrono::{Duration, TimeZone, Utc};
use smart_parking::lot::{LotError, ParkingLot, SharedLot, SpotSize, Vehicle, VehicleSize};

#[test]
fn test_concurrent_check_ins_never_share_a_spot() {
    let mut lot = ParkingLot::new();
    for n in 1..=10 {
        lot.add_spot(format!("M{}", n), SpotSize::Medium).unwrap();
    }
    let shared = SharedLot::new(lot);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                (0..5)
                    .map(|n| {
                        let plate = format!("W{}-{}", worker, n);
                        shared.check_in(&Vehicle::new(plate, VehicleSize::Car))
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    let tickets: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).copied().collect();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(LotError::NoSpotAvailable(VehicleSize::Car))))
        .count();
    assert_eq!(tickets.len(), 10);
    assert_eq!(rejected, 10);

    let unique_ids: HashSet<_> = tickets.iter().collect();
    assert_eq!(unique_ids.len(), tickets.len());

    let spots: HashSet<_> = tickets
        .iter()
        .map(|id| shared.ticket(*id).unwrap().spot_id)
        .collect();
    assert_eq!(spots.len(), 10);
    assert_eq!(shared.availability().total(), 0);
}

#[test]
fn test_shared_check_out() {
    let mut lot = ParkingLot::new();
    lot.add_spot("L1", SpotSize::Large).unwrap();
    let shared = SharedLot::new(lot);

    let entry = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let ticket_id = shared
        .check_in_at(&Vehicle::new("BUS-1", VehicleSize::Bus), entry)
        .unwrap();

    let worker = shared.clone();
    let fee = thread::spawn(move || worker.check_out_at(ticket_id, entry + Duration::minutes(200)))
        .join()
        .unwrap()
        .unwrap();

    assert_eq!(fee, 200);
    assert_eq!(shared.availability().get(SpotSize::Large), 1);
    assert_eq!(shared.with_lot(|lot| lot.revenue()), 200);
}

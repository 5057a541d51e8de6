//! crates/frontdesk_core/src/seed.rs
//!
//! Demo data for a fresh installation.

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{Booking, Employee, Guest, NewEmployee, NewRoom, Room, RoomType};
use crate::store::EntityStore;

fn amenities(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

/// Writes three rooms and two employees, unless rooms were ever stored.
///
/// Returns whether anything was written.
pub async fn seed_sample_data(store: &EntityStore) -> bool {
    if store.contains::<Room>().await {
        return false;
    }

    let rooms = [
        ("101", RoomType::Single, 1, 2000, &["WiFi", "TV", "Mini Fridge"][..]),
        ("102", RoomType::Double, 2, 3500, &["WiFi", "TV", "Mini Fridge", "Balcony"][..]),
        ("201", RoomType::Suite, 2, 6000, &["WiFi", "TV", "Mini Fridge", "Balcony", "Kitchenette"][..]),
    ];
    for (room_number, room_type, beds, price_per_day, labels) in rooms {
        store
            .create::<Room>(NewRoom {
                room_number: room_number.to_string(),
                room_type,
                has_ac: true,
                beds,
                price_per_day,
                is_available: true,
                amenities: amenities(labels),
            })
            .await;
    }

    let staff = [
        ("Rajesh Kumar", "Front Desk Manager", 35_000, (2023, 1, 15), "9876543210"),
        ("Priya Sharma", "Housekeeping Supervisor", 28_000, (2023, 3, 1), "9876543211"),
    ];
    for (name, designation, monthly_salary, (y, m, d), contact_number) in staff {
        let Some(joining_date) = NaiveDate::from_ymd_opt(y, m, d) else {
            continue;
        };
        store
            .create::<Employee>(NewEmployee {
                name: name.to_string(),
                designation: designation.to_string(),
                monthly_salary,
                joining_date,
                contact_number: contact_number.to_string(),
                is_active: true,
            })
            .await;
    }

    // Empty but present, so later reads see initialised collections.
    if !store.contains::<Guest>().await {
        store.replace_all::<Guest>(&[]).await;
    }
    if !store.contains::<Booking>().await {
        store.replace_all::<Booking>(&[]).await;
    }

    info!("Seeded sample rooms and employees");
    true
}

//! crates/frontdesk_core/src/analytics.rs
//!
//! Dashboard figures, derived by scanning the collections on every call.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};

use crate::bookings::is_active;
use crate::domain::{Booking, DashboardStats, Employee, RevenuePoint, Room};
use crate::store::EntityStore;

/// Number of months returned by [`Analytics::revenue_series`].
pub const REVENUE_MONTHS: usize = 6;

/// Totals are reported as `u64::MAX` rather than wrapping.
pub(crate) fn saturating_sum(amounts: impl Iterator<Item = u64>) -> u64 {
    amounts.fold(0, u64::saturating_add)
}

#[derive(Clone)]
pub struct Analytics {
    store: EntityStore,
}

impl Analytics {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn compute_stats(&self, as_of: DateTime<Utc>) -> DashboardStats {
        let rooms = self.store.list::<Room>().await;
        let employees = self.store.list::<Employee>().await;
        let bookings = self.store.list::<Booking>().await;

        let paid = || bookings.iter().filter(|booking| booking.is_paid);
        let total_revenue = saturating_sum(paid().map(|booking| booking.total_amount));
        let monthly_revenue = saturating_sum(
            paid()
                .filter(|booking| {
                    booking.created_at.year() == as_of.year() && booking.created_at.month() == as_of.month()
                })
                .map(|booking| booking.total_amount),
        );

        let active: Vec<&Booking> = bookings.iter().filter(|booking| is_active(booking, as_of)).collect();
        let occupied: usize = active.iter().map(|booking| booking.room_ids.len()).sum();
        let occupancy_rate = if rooms.is_empty() {
            0.0
        } else {
            occupied as f64 / rooms.len() as f64 * 100.0
        };

        let on_payroll = employees.iter().filter(|employee| employee.is_active);

        DashboardStats {
            total_revenue,
            monthly_revenue,
            total_bookings: bookings.len(),
            active_bookings: active.len(),
            occupancy_rate,
            total_rooms: rooms.len(),
            available_rooms: rooms.len().saturating_sub(occupied),
            total_employees: on_payroll.clone().count(),
            monthly_expenses: saturating_sum(on_payroll.map(|employee| employee.monthly_salary)),
        }
    }

    /// Paid revenue and booking counts per month of booking creation, oldest
    /// first, for the last [`REVENUE_MONTHS`] months that have any bookings.
    pub async fn revenue_series(&self, as_of: DateTime<Utc>) -> Vec<RevenuePoint> {
        let mut months: BTreeMap<(i32, u32), RevenuePoint> = BTreeMap::new();
        for booking in self.store.list::<Booking>().await {
            if booking.created_at > as_of {
                continue;
            }
            let created = booking.created_at;
            let point = months
                .entry((created.year(), created.month()))
                .or_insert_with(|| RevenuePoint {
                    month: created.format("%b %Y").to_string(),
                    revenue: 0,
                    bookings: 0,
                });
            if booking.is_paid {
                point.revenue = point.revenue.saturating_add(booking.total_amount);
            }
            point.bookings += 1;
        }

        let skip = months.len().saturating_sub(REVENUE_MONTHS);
        months.into_values().skip(skip).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookings::{BookingEngine, BookingRequest};
    use crate::clock::ManualClock;
    use crate::domain::{BookingDraft, NewEmployee, NewRoom, RoomType};
    use crate::guests::GuestResolver;
    use crate::memory::InMemoryStore;
    use chrono::{NaiveDate, TimeZone};
    use std::sync::Arc;

    struct Hotel {
        store: EntityStore,
        clock: Arc<ManualClock>,
        engine: BookingEngine,
        analytics: Analytics,
        rooms: Vec<Room>,
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn hotel(room_count: usize) -> Hotel {
        let clock = Arc::new(ManualClock::new(at(2024, 1, 1)));
        let store = EntityStore::new(Arc::new(InMemoryStore::new()), clock.clone());
        let mut rooms = Vec::new();
        for i in 0..room_count {
            rooms.push(
                store
                    .create::<Room>(NewRoom {
                        room_number: format!("{}", 101 + i),
                        room_type: RoomType::Double,
                        has_ac: false,
                        beds: 2,
                        price_per_day: 1000,
                        is_available: true,
                        amenities: Vec::new(),
                    })
                    .await,
            );
        }
        Hotel {
            engine: BookingEngine::new(store.clone()),
            analytics: Analytics::new(store.clone()),
            store,
            clock,
            rooms,
        }
    }

    async fn book(hotel: &Hotel, room: usize, check_in: NaiveDate, check_out: NaiveDate) -> Booking {
        hotel
            .engine
            .create_booking(BookingRequest {
                guest_name: "Kavya Nair".to_string(),
                mobile_number: "9812345670".to_string(),
                room_ids: vec![hotel.rooms[room].id],
                check_in_date: check_in,
                check_out_date: check_out,
                notes: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn no_rooms_means_zero_occupancy() {
        let hotel = hotel(0).await;
        let stats = hotel.analytics.compute_stats(at(2024, 1, 5)).await;

        assert_eq!(stats.occupancy_rate, 0.0);
        assert_eq!(stats.total_rooms, 0);
        assert_eq!(stats.available_rooms, 0);
        assert_eq!(stats.total_bookings, 0);
    }

    #[tokio::test]
    async fn every_room_covered_once_is_full_occupancy() {
        let hotel = hotel(3).await;
        for room in 0..3 {
            book(&hotel, room, date(2024, 1, 4), date(2024, 1, 6)).await;
        }

        let stats = hotel.analytics.compute_stats(at(2024, 1, 5)).await;
        assert_eq!(stats.active_bookings, 3);
        assert_eq!(stats.occupancy_rate, 100.0);
        assert_eq!(stats.available_rooms, 0);

        let later = hotel.analytics.compute_stats(at(2024, 1, 7)).await;
        assert_eq!(later.active_bookings, 0);
        assert_eq!(later.available_rooms, 3);
    }

    #[tokio::test]
    async fn partial_occupancy_and_revenue() {
        let hotel = hotel(4).await;
        let paid = book(&hotel, 0, date(2024, 1, 1), date(2024, 1, 3)).await;
        book(&hotel, 1, date(2024, 1, 2), date(2024, 1, 4)).await;
        book(&hotel, 2, date(2024, 2, 1), date(2024, 2, 2)).await;
        hotel.engine.set_payment(paid.id, true).await.unwrap();

        let stats = hotel.analytics.compute_stats(at(2024, 1, 2)).await;
        assert_eq!(stats.total_bookings, 3);
        assert_eq!(stats.active_bookings, 2);
        assert_eq!(stats.occupancy_rate, 50.0);
        assert_eq!(stats.available_rooms, 2);
        assert_eq!(stats.total_revenue, 2000);
        assert_eq!(stats.monthly_revenue, 2000);

        let next_month = hotel.analytics.compute_stats(at(2024, 2, 1)).await;
        assert_eq!(next_month.total_revenue, 2000);
        assert_eq!(next_month.monthly_revenue, 0);
    }

    #[tokio::test]
    async fn only_active_employees_count_towards_expenses() {
        let hotel = hotel(1).await;
        for (name, salary, is_active) in [("Rajesh Kumar", 35_000, true), ("Priya Sharma", 28_000, false)] {
            hotel
                .store
                .create::<Employee>(NewEmployee {
                    name: name.to_string(),
                    designation: "Staff".to_string(),
                    monthly_salary: salary,
                    joining_date: date(2023, 1, 15),
                    contact_number: "9876543210".to_string(),
                    is_active,
                })
                .await;
        }

        let stats = hotel.analytics.compute_stats(at(2024, 1, 1)).await;
        assert_eq!(stats.total_employees, 1);
        assert_eq!(stats.monthly_expenses, 35_000);
    }

    #[tokio::test]
    async fn available_rooms_never_go_negative() {
        let hotel = hotel(1).await;
        let guest = GuestResolver::new(hotel.store.clone())
            .resolve_guest("Kavya Nair", "9812345670")
            .await;
        // Overlapping records can exist in stores written before double
        // booking was refused.
        for _ in 0..2 {
            hotel
                .store
                .create::<Booking>(BookingDraft {
                    guest: guest.clone(),
                    rooms: vec![hotel.rooms[0].clone()],
                    check_in_date: date(2024, 1, 1),
                    check_out_date: date(2024, 1, 3),
                    total_amount: 2000,
                    notes: None,
                })
                .await;
        }

        let stats = hotel.analytics.compute_stats(at(2024, 1, 2)).await;
        assert_eq!(stats.occupancy_rate, 200.0);
        assert_eq!(stats.available_rooms, 0);
    }

    #[tokio::test]
    async fn revenue_series_keeps_last_six_months_in_order() {
        let hotel = hotel(1).await;
        let mut ids = Vec::new();
        for month in 1..=8u32 {
            hotel.clock.set(at(2024, month, 10));
            let check_in = date(2024, month, 20);
            ids.push(book(&hotel, 0, check_in, check_in + chrono::Duration::days(1)).await.id);
        }
        hotel.clock.set(at(2024, 8, 11));
        let extra = book(&hotel, 0, date(2024, 8, 25), date(2024, 8, 27)).await;
        hotel.engine.set_payment(extra.id, true).await.unwrap();
        hotel.engine.set_payment(ids[7], true).await.unwrap();

        let series = hotel.analytics.revenue_series(at(2024, 8, 31)).await;
        let months: Vec<&str> = series.iter().map(|point| point.month.as_str()).collect();
        assert_eq!(months, ["Mar 2024", "Apr 2024", "May 2024", "Jun 2024", "Jul 2024", "Aug 2024"]);
        assert_eq!(series[5].bookings, 2);
        assert_eq!(series[5].revenue, 1000 + 2000);
        assert_eq!(series[0].revenue, 0);
        assert_eq!(series[0].bookings, 1);

        let earlier = hotel.analytics.revenue_series(at(2024, 2, 28)).await;
        assert_eq!(earlier.len(), 2);
        assert_eq!(earlier[0].month, "Jan 2024");
    }

    #[tokio::test]
    async fn revenue_totals_saturate_instead_of_wrapping() {
        let hotel = hotel(2).await;
        let guest = GuestResolver::new(hotel.store.clone())
            .resolve_guest("Kavya Nair", "9812345670")
            .await;
        for room in &hotel.rooms {
            let booking: Booking = hotel
                .store
                .create(BookingDraft {
                    guest: guest.clone(),
                    rooms: vec![room.clone()],
                    check_in_date: date(2024, 1, 1),
                    check_out_date: date(2024, 1, 2),
                    total_amount: u64::MAX - 1,
                    notes: None,
                })
                .await;
            hotel.engine.set_payment(booking.id, true).await.unwrap();
        }

        let stats = hotel.analytics.compute_stats(at(2024, 1, 1)).await;
        assert_eq!(stats.total_revenue, u64::MAX);
        assert_eq!(stats.monthly_revenue, u64::MAX);
        assert_eq!(hotel.analytics.revenue_series(at(2024, 1, 1)).await[0].revenue, u64::MAX);
    }
}

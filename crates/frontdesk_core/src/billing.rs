//! crates/frontdesk_core/src/billing.rs
//!
//! Bills for resolved bookings. A bill is built from the booking alone, so it
//! should be given a booking read through the engine (current snapshots).
//! Lines are charged at the rates the booking was priced at, so they add up
//! to the recorded total even after a room's rate changes.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Booking, RoomType};

/// Formats a whole-unit amount as rupees with comma thousands separators.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("₹{grouped}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    pub room_number: String,
    pub room_type: RoomType,
    pub rate: u64,
    pub nights: u64,
    pub subtotal: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub invoice_number: Uuid,
    pub issued_on: NaiveDate,
    pub guest_name: String,
    pub mobile_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: u64,
    pub lines: Vec<BillLine>,
    /// The amount recorded on the booking.
    pub total: u64,
    pub payment_status: String,
}

impl Bill {
    pub fn for_booking(booking: &Booking, issued_on: NaiveDate) -> Self {
        let nights = u64::try_from(booking.nights()).unwrap_or(0);
        let lines = booking
            .rooms
            .iter()
            .map(|room| {
                let rate = booking.rate_for(room);
                BillLine {
                    room_number: room.room_number.clone(),
                    room_type: room.room_type,
                    rate,
                    nights,
                    subtotal: rate.saturating_mul(nights),
                }
            })
            .collect();

        Bill {
            invoice_number: booking.id,
            issued_on,
            guest_name: booking.guest.full_name.clone(),
            mobile_number: booking.guest.mobile_number.clone(),
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            nights,
            lines,
            total: booking.total_amount,
            payment_status: booking.payment_status.label().to_string(),
        }
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DATE: &str = "%d %b %Y";

        writeln!(f, "Hotel Bill")?;
        writeln!(f, "Hotel Management System")?;
        writeln!(f, "Invoice #: {}", self.invoice_number)?;
        writeln!(f, "Date: {}", self.issued_on.format(DATE))?;
        writeln!(f)?;
        writeln!(f, "Guest Details:")?;
        writeln!(f, "  Name: {}", self.guest_name)?;
        writeln!(f, "  Mobile: {}", self.mobile_number)?;
        writeln!(f, "  Check-in: {}", self.check_in_date.format(DATE))?;
        writeln!(f, "  Check-out: {}", self.check_out_date.format(DATE))?;
        writeln!(f)?;
        writeln!(f, "Room Details:")?;
        for line in &self.lines {
            let room = format!("Room {} ({})", line.room_number, line.room_type);
            let rate = format!("{}/day x {} days", format_currency(line.rate), line.nights);
            writeln!(f, "  {room:<24}{rate:<28}{}", format_currency(line.subtotal))?;
        }
        writeln!(f)?;
        writeln!(f, "Total Amount: {}", format_currency(self.total))?;
        writeln!(f, "Payment Status: {}", self.payment_status)?;
        writeln!(f)?;
        writeln!(f, "Thank you for choosing our hotel!")?;
        write!(f, "For any queries, please contact the front desk.")
    }
}

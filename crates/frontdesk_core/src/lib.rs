pub mod analytics;
pub mod billing;
pub mod bookings;
pub mod clock;
pub mod domain;
pub mod employees;
pub mod error;
pub mod guests;
pub mod memory;
pub mod ports;
pub mod rooms;
pub mod seed;
pub mod store;

pub use analytics::Analytics;
pub use billing::Bill;
pub use bookings::{BookingEngine, BookingFilter, BookingHistory, BookingRequest, BookingUpdate, PaymentFilter};
pub use clock::{ManualClock, SystemClock};
pub use domain::{
    Booking, DashboardStats, Employee, Guest, NewEmployee, NewRoom, PaymentStatus, RevenuePoint, Room, RoomType,
};
pub use employees::{EmployeePatch, Payroll, StaffRoster};
pub use error::{ServiceError, ServiceResult, ValidationError};
pub use guests::GuestResolver;
pub use memory::InMemoryStore;
pub use ports::{Clock, KeyValueStore, PortError, PortResult};
pub use rooms::{RoomDirectory, RoomPatch};
pub use store::{Entity, EntityStore, StoreWriter};

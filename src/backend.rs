use crate::types::{Booking, BookingError, Club, Slot, Space};
use chrono::NaiveDate;
use uuid::Uuid;

pub trait BookingBackend: Clone + Send + Sync + 'static {
    fn clubs(&self) -> Vec<Club>;
    fn register_club(&self, club: Club) -> Result<(), BookingError>;
    fn bookings(&self) -> Vec<Booking>;
    /// Exact-triple lookup. Slots are discrete, so there is no overlap math.
    fn occupancy(&self, space: Space, date: NaiveDate, slot: Slot) -> Option<Booking>;
    /// Check-and-insert must be atomic: two submissions for the same triple
    /// must never both succeed.
    fn book(
        &self,
        club_email: &str,
        space: Space,
        date: NaiveDate,
        slot: Slot,
    ) -> Result<Booking, BookingError>;
    fn remove_booking(&self, id: Uuid) -> Result<(), BookingError>;
    fn remove_all_bookings(&self);
}

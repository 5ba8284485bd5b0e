use crate::{
    backend::BookingBackend,
    types::{Booking, BookingError, Club, Slot, Space},
};
use chrono::NaiveDate;
use std::{
    collections::{hash_map::Entry, HashMap},
    sync::{Arc, Mutex},
};
use tracing::info;
use uuid::Uuid;

/// In-memory backend used when no database is configured. Bookings are lost
/// on restart.
#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    clubs: HashMap<String, Club>,
    bookings: HashMap<(Space, NaiveDate, Slot), Booking>,
}

impl LocalBookings {
    pub fn insert_example_clubs(&self) {
        let examples = [
            ("run.club@campus.edu", "Run Club"),
            ("fine.arts@campus.edu", "Fine Arts Society"),
            ("chess@campus.edu", "Chess Club"),
        ];
        let mut inner = self.inner.lock().unwrap();
        for (email, name) in examples {
            inner.clubs.insert(
                email.to_string(),
                Club {
                    email: email.to_string(),
                    name: name.to_string(),
                },
            );
        }
        info!("inserted {} example clubs", examples.len());
    }
}

impl BookingBackend for LocalBookings {
    fn clubs(&self) -> Vec<Club> {
        self.inner.lock().unwrap().clubs.values().cloned().collect()
    }

    fn register_club(&self, club: Club) -> Result<(), BookingError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.clubs.entry(club.email.clone()) {
            Entry::Occupied(_) => Err(BookingError::DuplicateClub(club.email)),
            Entry::Vacant(entry) => {
                entry.insert(club);
                Ok(())
            }
        }
    }

    fn bookings(&self) -> Vec<Booking> {
        self.inner
            .lock()
            .unwrap()
            .bookings
            .values()
            .cloned()
            .collect()
    }

    fn occupancy(&self, space: Space, date: NaiveDate, slot: Slot) -> Option<Booking> {
        self.inner
            .lock()
            .unwrap()
            .bookings
            .get(&(space, date, slot))
            .cloned()
    }

    fn book(
        &self,
        club_email: &str,
        space: Space,
        date: NaiveDate,
        slot: Slot,
    ) -> Result<Booking, BookingError> {
        // One guard across check and insert keeps the uniqueness invariant
        // under concurrent submissions.
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        let club = inner
            .clubs
            .get(club_email)
            .cloned()
            .ok_or_else(|| BookingError::UnknownClub(club_email.to_string()))?;
        match inner.bookings.entry((space, date, slot)) {
            Entry::Occupied(existing) => Err(BookingError::Conflict(existing.get().clone())),
            Entry::Vacant(entry) => {
                let booking = Booking {
                    id: Uuid::new_v4(),
                    club,
                    space,
                    date,
                    slot,
                };
                entry.insert(booking.clone());
                Ok(booking)
            }
        }
    }

    fn remove_booking(&self, id: Uuid) -> Result<(), BookingError> {
        let mut inner = self.inner.lock().unwrap();
        let key = inner
            .bookings
            .iter()
            .find(|(_, booking)| booking.id == id)
            .map(|(key, _)| *key)
            .ok_or(BookingError::UnknownBooking(id))?;
        inner.bookings.remove(&key);
        Ok(())
    }

    fn remove_all_bookings(&self) {
        self.inner.lock().unwrap().bookings.clear();
    }
}

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    backend::BookingBackend,
    configuration::Configuration,
    types::{Booking, BookingError, Club, Slot, Space},
};

pub fn example_club() -> Club {
    Club {
        email: "run.club@campus.edu".into(),
        name: "Run Club".into(),
    }
}

pub fn example_booking() -> Booking {
    Booking {
        id: Uuid::new_v4(),
        club: example_club(),
        space: Space::Sh1,
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        slot: Slot::H16,
    }
}

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    pub calls_to_clubs: AtomicU64,
    pub calls_to_register_club: AtomicU64,
    pub calls_to_bookings: AtomicU64,
    pub calls_to_occupancy: AtomicU64,
    pub calls_to_book: AtomicU64,
    pub calls_to_remove_booking: AtomicU64,
    pub calls_to_remove_all_bookings: AtomicU64,
    pub bookings: Mutex<Vec<Booking>>,
    pub clubs: Mutex<Vec<Club>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_clubs: AtomicU64::default(),
            calls_to_register_club: AtomicU64::default(),
            calls_to_bookings: AtomicU64::default(),
            calls_to_occupancy: AtomicU64::default(),
            calls_to_book: AtomicU64::default(),
            calls_to_remove_booking: AtomicU64::default(),
            calls_to_remove_all_bookings: AtomicU64::default(),
            bookings: Mutex::default(),
            clubs: Mutex::default(),
        }
    }
}

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner::new()))
    }

    fn succeeds(&self) -> bool {
        self.0.success.load(Ordering::SeqCst)
    }
}

impl BookingBackend for MockBookingBackend {
    fn clubs(&self) -> Vec<Club> {
        self.0.calls_to_clubs.fetch_add(1, Ordering::SeqCst);
        self.0.clubs.lock().unwrap().clone()
    }

    fn register_club(&self, club: Club) -> Result<(), BookingError> {
        self.0.calls_to_register_club.fetch_add(1, Ordering::SeqCst);
        match self.succeeds() {
            true => Ok(()),
            false => Err(BookingError::DuplicateClub(club.email)),
        }
    }

    fn bookings(&self) -> Vec<Booking> {
        self.0.calls_to_bookings.fetch_add(1, Ordering::SeqCst);
        self.0.bookings.lock().unwrap().clone()
    }

    fn occupancy(&self, space: Space, date: NaiveDate, slot: Slot) -> Option<Booking> {
        self.0.calls_to_occupancy.fetch_add(1, Ordering::SeqCst);
        self.0
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|booking| {
                booking.space == space && booking.date == date && booking.slot == slot
            })
            .cloned()
    }

    fn book(
        &self,
        club_email: &str,
        space: Space,
        date: NaiveDate,
        slot: Slot,
    ) -> Result<Booking, BookingError> {
        self.0.calls_to_book.fetch_add(1, Ordering::SeqCst);
        match self.succeeds() {
            true => Ok(Booking {
                id: Uuid::new_v4(),
                club: Club {
                    email: club_email.to_string(),
                    name: "Mock Club".to_string(),
                },
                space,
                date,
                slot,
            }),
            false => Err(BookingError::Conflict(example_booking())),
        }
    }

    fn remove_booking(&self, id: Uuid) -> Result<(), BookingError> {
        self.0.calls_to_remove_booking.fetch_add(1, Ordering::SeqCst);
        match self.succeeds() {
            true => Ok(()),
            false => Err(BookingError::UnknownBooking(id)),
        }
    }

    fn remove_all_bookings(&self) {
        self.0
            .calls_to_remove_all_bookings
            .fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct TestConfiguration {
    pub website_title: String,
    pub admin_password: String,
    pub frontend_path: PathBuf,
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self {
            website_title: "Campus Space Booking".into(),
            admin_password: "123".into(),
            frontend_path: PathBuf::from("frontend/index.html"),
        }
    }
}

impl Configuration for TestConfiguration {
    fn website_title(&self) -> String {
        self.website_title.clone()
    }

    fn admin_password(&self) -> String {
        self.admin_password.clone()
    }

    fn frontend_path(&self) -> PathBuf {
        self.frontend_path.clone()
    }

    fn database_url(&self) -> Option<String> {
        None
    }

    fn port(&self) -> String {
        "0".into()
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// A club, identified by its university email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub email: String,
    pub name: String,
}

/// The fixed set of bookable spaces on campus. Serialized as the room
/// identifier printed on the door ("SH1", "2C", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Space {
    Sh1,
    Sh2,
    Sh3,
    Room1A,
    Room1B,
    Room1C,
    Room1D,
    Room1E,
    Room2A,
    Room2B,
    Room2C,
    Room2D,
    Room2E,
    Room2F,
    Room2G,
    Room3A,
    Room3B,
    Room3C,
    Room3D,
    Room3E,
    Room3F,
    Room3G,
    Room3H,
    Room3I,
}

impl Space {
    pub const ALL: [Space; 24] = [
        Space::Sh1,
        Space::Sh2,
        Space::Sh3,
        Space::Room1A,
        Space::Room1B,
        Space::Room1C,
        Space::Room1D,
        Space::Room1E,
        Space::Room2A,
        Space::Room2B,
        Space::Room2C,
        Space::Room2D,
        Space::Room2E,
        Space::Room2F,
        Space::Room2G,
        Space::Room3A,
        Space::Room3B,
        Space::Room3C,
        Space::Room3D,
        Space::Room3E,
        Space::Room3F,
        Space::Room3G,
        Space::Room3H,
        Space::Room3I,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Space::Sh1 => "SH1",
            Space::Sh2 => "SH2",
            Space::Sh3 => "SH3",
            Space::Room1A => "1A",
            Space::Room1B => "1B",
            Space::Room1C => "1C",
            Space::Room1D => "1D",
            Space::Room1E => "1E",
            Space::Room2A => "2A",
            Space::Room2B => "2B",
            Space::Room2C => "2C",
            Space::Room2D => "2D",
            Space::Room2E => "2E",
            Space::Room2F => "2F",
            Space::Room2G => "2G",
            Space::Room3A => "3A",
            Space::Room3B => "3B",
            Space::Room3C => "3C",
            Space::Room3D => "3D",
            Space::Room3E => "3E",
            Space::Room3F => "3F",
            Space::Room3G => "3G",
            Space::Room3H => "3H",
            Space::Room3I => "3I",
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Space {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Space::ALL
            .into_iter()
            .find(|space| space.as_str() == s)
            .ok_or_else(|| BookingError::UnknownSpace(s.to_string()))
    }
}

impl TryFrom<String> for Space {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Space> for String {
    fn from(space: Space) -> Self {
        space.as_str().to_string()
    }
}

/// One of the eight fixed one-hour booking windows between 16:00 and
/// midnight, identified by its start hour. Serialized as the start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Slot {
    H16 = 16,
    H17 = 17,
    H18 = 18,
    H19 = 19,
    H20 = 20,
    H21 = 21,
    H22 = 22,
    H23 = 23,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::H16,
        Slot::H17,
        Slot::H18,
        Slot::H19,
        Slot::H20,
        Slot::H21,
        Slot::H22,
        Slot::H23,
    ];

    pub fn start_hour(&self) -> u8 {
        *self as u8
    }

    /// The last slot wraps around to midnight of the following day.
    pub fn end_hour(&self) -> u8 {
        (self.start_hour() + 1) % 24
    }

    pub fn label(&self) -> String {
        format!("{:02}:00-{:02}:00", self.start_hour(), self.end_hour())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl TryFrom<u8> for Slot {
    type Error = BookingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.start_hour() == value)
            .ok_or(BookingError::UnknownSlot(value))
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.start_hour()
    }
}

/// A confirmed reservation of one space for one slot on one date.
/// Never mutated after creation; removable only through the admin routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub club: Club,
    pub space: Space,
    pub date: NaiveDate,
    pub slot: Slot,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("`{0}` is not one of the bookable spaces")]
    UnknownSpace(String),

    #[error("{0} is not the start hour of a bookable slot")]
    UnknownSlot(u8),

    #[error("no club is registered under `{0}`")]
    UnknownClub(String),

    #[error("a club is already registered under `{0}`")]
    DuplicateClub(String),

    #[error("{space} is already booked by {club} on {date} ({slot})",
        space = .0.space, club = .0.club.name, date = .0.date, slot = .0.slot)]
    Conflict(Booking),

    #[error("no booking with id {0}")]
    UnknownBooking(Uuid),

    #[error("database error: {0}")]
    Database(String),
}

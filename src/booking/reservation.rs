use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::room::{Price, Priced, Room, RoomClass};

/// A room held for a single stay date. Immutable once created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reservation {
    room: Room,
    date: NaiveDate,
}

impl Reservation {
    pub fn new(room: Room, date: NaiveDate) -> Self {
        Self { room, date }
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn room_class(&self) -> RoomClass {
        self.room.class
    }

    pub fn room_number(&self) -> u32 {
        self.room.number
    }

    /// Whether this reservation holds `room_number` on `date`, whatever the class.
    pub fn occupies(&self, room_number: u32, date: NaiveDate) -> bool {
        self.room.number == room_number && self.date == date
    }
}

impl Priced for Reservation {
    fn price(&self) -> Price {
        self.room.price()
    }
}

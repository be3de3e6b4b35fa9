use std::sync::Arc;

use chrono::NaiveDate;

use super::{
    hotel::Hotel,
    reservation::Reservation,
    room::{Price, Priced, Room, RoomClass},
};
use crate::time::{Clock, SystemClock};

/// Books and cancels stays against a shared hotel catalog.
///
/// Reservations are kept in booking order. Failures are reported as values:
/// `None` from [`BookingLedger::book_room`] when nothing is free and `false`
/// from [`BookingLedger::cancel_reservation`] when nothing matches.
pub struct BookingLedger {
    hotel: Arc<Hotel>,
    reservations: Vec<Reservation>,
    clock: Arc<dyn Clock>,
}

impl BookingLedger {
    pub fn new(hotel: Arc<Hotel>) -> Self {
        Self::with_clock(hotel, Arc::new(SystemClock))
    }

    pub fn with_clock(hotel: Arc<Hotel>, clock: Arc<dyn Clock>) -> Self {
        Self {
            hotel,
            reservations: Vec::new(),
            clock,
        }
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    /// Reserves the first free room of `class` on `date` and returns its price.
    ///
    /// The date is not checked against today; see [`BookingLedger::is_valid_date`].
    pub fn book_room(&mut self, class: RoomClass, date: NaiveDate) -> Option<Price> {
        let room = *self.available_room(class, date)?;
        self.reservations.push(Reservation::new(room, date));
        Some(room.price())
    }

    /// Removes the first reservation matching class, room number text and date.
    ///
    /// A reservation booked under another class is not matched even when the
    /// number and date agree.
    pub fn cancel_reservation(
        &mut self,
        class: RoomClass,
        room_number: &str,
        date: NaiveDate,
    ) -> bool {
        let position = self.reservations.iter().position(|reservation| {
            reservation.room_class() == class
                && reservation.room_number().to_string() == room_number
                && reservation.date() == date
        });
        match position {
            Some(index) => {
                self.reservations.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn list_reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// True when no reservation holds this room number on `date`. Class is ignored.
    pub fn is_room_available(&self, room: &Room, date: NaiveDate) -> bool {
        !self
            .reservations
            .iter()
            .any(|reservation| reservation.occupies(room.number, date))
    }

    /// True when `date` is strictly after today.
    pub fn is_valid_date(&self, date: NaiveDate) -> bool {
        date > self.clock.today()
    }

    /// First room of `class` in catalog order that is free on `date`.
    pub fn available_room(&self, class: RoomClass, date: NaiveDate) -> Option<&Room> {
        self.hotel
            .rooms()
            .iter()
            .find(|room| room.class == class && self.is_room_available(room, date))
    }
}

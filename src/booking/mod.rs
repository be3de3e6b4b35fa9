//! Booking domain: room catalog, reservations, and the booking ledger.
//!
//! Nothing here depends on the shell, performs I/O, or logs.

pub mod hotel;
pub mod ledger;
pub mod reservation;
pub mod room;

pub use hotel::Hotel;
pub use ledger::BookingLedger;
pub use reservation::Reservation;
pub use room::{ParseRoomClassError, Price, Priced, Room, RoomClass};

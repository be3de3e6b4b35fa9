#![doc(test(attr(deny(warnings))))]

//! Hotel Booking keeps an in-memory room catalog and booking ledger, with an
//! interactive shell for booking, cancelling, and listing reservations.

pub mod booking;
pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Hotel Booking tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}

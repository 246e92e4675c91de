#![doc(test(attr(deny(warnings))))]

//! Vacation Budget records trip expenses, keeps them in a local key-value
//! store, and derives category and time-window summaries from them.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod expense;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Vacation Budget tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}

//! Logging for the transition core
//!
//! The macros forward to defmt on embedded builds (`defmt` feature) and to
//! `println!` in host tests; in any other build they compile to nothing, so
//! the tick path carries no logging cost unless a sink is attached. The
//! core logs sparingly: flight-mode changes, failsafe engagement, and the
//! front-transition watchdog.

/// Log a routine event (flight-mode changes, transition progress).
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[INFO] {}", format!($($arg)*));
    };
}

/// Log a degraded condition the core recovers from on its own
/// (failsafe override engaged, inputs substituted).
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[WARN] {}", format!($($arg)*));
    };
}

/// Log a safety event surfaced to the outer controller
/// (watchdog expiry, abort advisories).
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));
    };
}

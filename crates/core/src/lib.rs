//! Venue layout domain logic.
//!
//! Pure geometry and bookkeeping for room layouts: unit conversion, room
//! boundaries, placed elements, seat assignment, visit routes and hit
//! testing. Nothing in this crate performs I/O.

pub mod catalog;
pub mod element;
pub mod error;
pub mod hit_test;
pub mod ledger;
pub mod room;
pub mod route;
pub mod shape;
pub mod types;
pub mod units;

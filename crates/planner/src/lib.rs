//! Layout editing sessions on top of `venue_core`.
//!
//! Exposes the pieces a host application wires together:
//!
//! - [`EditSession`] owns one room, its assignment ledger and its route, and
//!   is the only place state changes happen.
//! - [`PlannerConfig`] carries the canvas scale and element cap.
//! - [`Roster`] holds the people and vendors that can be seated.
//! - [`export`] produces save snapshots and route handouts.

pub mod config;
pub mod error;
pub mod export;
pub mod roster;
pub mod session;

pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerResult};
pub use roster::{Person, Roster, SeedReport};
pub use session::EditSession;

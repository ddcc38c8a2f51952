//! ICS file generation.
//!
//! This module writes the current event list as an RFC 5545 calendar.

mod generate;

pub use generate::{DateParts, Organizer, generate_ics};

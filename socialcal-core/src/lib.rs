//! Core types for socialcal.
//!
//! This crate holds everything the CLI needs that isn't presentation:
//! - `event` and `calendar` for personal events, public events and calendars
//! - `ordering`, `recurrence` and `filter` for building the timeline
//! - `csv_import` and `ics` for moving events in and out
//! - `session` tying it together over one in-memory state

pub mod calendar;
pub mod config;
pub mod csv_import;
pub mod error;
pub mod event;
pub mod feed;
pub mod filter;
pub mod ics;
pub mod likes;
pub mod ordering;
pub mod recurrence;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timestamp;

pub use error::{SocialCalError, SocialCalResult};
pub use event::*;

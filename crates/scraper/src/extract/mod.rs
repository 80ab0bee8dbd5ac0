//! Heuristic event extraction from parsed listing pages.
//!
//! No schema is guaranteed: every strategy here is an ordered fallback
//! chain, and the worst case is a plausible placeholder rather than an
//! error.

pub mod containers;
pub mod date;
pub mod fields;

pub use containers::locate_containers;
pub use fields::{event_id, parse_container, placeholder_image};

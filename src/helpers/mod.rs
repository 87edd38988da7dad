//! Helper functions over loaded content
//!
//! Date parsing and formatting for ordering and display, and feed
//! filtering for listing pages.

mod date;
mod filter;

pub use date::*;
pub use filter::*;

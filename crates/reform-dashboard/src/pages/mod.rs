//! Page composers.
//!
//! Each module exposes a `compose` function that queries the data provider
//! and returns the page's directives in display order: top to bottom, left
//! column before right column.

pub mod locations;
pub mod overview;
pub mod planning;
pub mod quality;
pub mod regional;

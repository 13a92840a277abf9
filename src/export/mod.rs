//! Export module.
//!
//! - `csv` - the report table as CSV
//! - `map` - marker and heat-layer point lists for the map view

pub mod csv;
pub mod map;

pub use self::csv::*;
pub use map::*;

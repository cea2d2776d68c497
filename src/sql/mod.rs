//! SQL text and parameter values for the beasts table.

pub mod params;
pub mod statements;
pub use params::*;

//! Store-facing operations behind the HTTP handlers.

pub mod beasts;
pub use beasts::BeastService;

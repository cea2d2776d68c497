//! HTTP handlers for the beast resource and service health checks.

pub mod beasts;
pub mod common;

mod beasts;
mod common;

pub use beasts::beast_routes;
pub use common::common_routes;

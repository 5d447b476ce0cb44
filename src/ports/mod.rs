//! Port traits: the boundary between domain logic and the outside world.

pub mod config_port;
pub mod export_port;
pub mod price_port;

// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the domain
// but are not part of the domain itself.

pub mod clock;
pub mod config;

pub use clock::{Clock, SystemClock};
pub use config::AppConfig;

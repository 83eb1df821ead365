// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between UI (Tauri) and the services
// - Translates between DTOs and domain entities
// - Commands are only compiled for the desktop shell

pub mod dto;
pub mod error_handling;
pub mod state;

#[cfg(feature = "desktop")]
pub mod commands;

pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;

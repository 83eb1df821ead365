// src/application/commands/mod.rs
//
// Tauri Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs, return DTOs
// - Errors leave as a serialized ErrorResponse
// - Commands NEVER contain business logic

pub mod bookmark_commands;
pub mod catalog_commands;
pub mod history_commands;
pub mod reading_list_commands;
pub mod session_commands;
pub mod statistics_commands;

pub use bookmark_commands::*;
pub use catalog_commands::*;
pub use history_commands::*;
pub use reading_list_commands::*;
pub use session_commands::*;
pub use statistics_commands::*;

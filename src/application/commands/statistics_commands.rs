// src/application/commands/statistics_commands.rs

use tauri::State;

use crate::application::{dto::DashboardDto, state::AppState};

#[tauri::command]
pub fn get_dashboard(state: State<'_, AppState>) -> DashboardDto {
    DashboardDto::from(state.statistics_service.dashboard())
}

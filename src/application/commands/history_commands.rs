// src/application/commands/history_commands.rs

use tauri::State;

use crate::application::{dto::*, error_handling::ToErrorResponse, state::AppState};

#[tauri::command]
pub fn record_history(
    dto: RecordHistoryDto,
    state: State<'_, AppState>,
) -> Result<HistoryEntryDto, String> {
    state
        .history_service
        .record(&dto.series_slug, &dto.title, &dto.chapter_id)
        .map(HistoryEntryDto::from)
        .to_error_response()
}

#[tauri::command]
pub fn list_history(state: State<'_, AppState>) -> Vec<HistoryEntryDto> {
    state
        .history_service
        .list()
        .into_iter()
        .map(HistoryEntryDto::from)
        .collect()
}

#[tauri::command]
pub fn list_series_history(series_slug: String, state: State<'_, AppState>) -> Vec<HistoryEntryDto> {
    state
        .history_service
        .list_recent_for_series(&series_slug)
        .into_iter()
        .map(HistoryEntryDto::from)
        .collect()
}

#[tauri::command]
pub fn clear_history(state: State<'_, AppState>) -> Result<(), String> {
    state.history_service.clear().to_error_response()
}

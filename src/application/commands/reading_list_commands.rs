// src/application/commands/reading_list_commands.rs

use tauri::State;

use crate::application::{dto::*, error_handling::ToErrorResponse, state::AppState};
use crate::domain::ReadingListEntry;

fn to_dtos(entries: Vec<ReadingListEntry>) -> Vec<ReadingListEntryDto> {
    entries.into_iter().map(ReadingListEntryDto::from).collect()
}

#[tauri::command]
pub async fn list_reading_list(state: State<'_, AppState>) -> Result<Vec<ReadingListEntryDto>, String> {
    state
        .reading_list_service
        .fetch_all()
        .await
        .map(to_dtos)
        .to_error_response()
}

#[tauri::command]
pub async fn save_reading_list_entry(
    dto: SaveReadingListEntryDto,
    state: State<'_, AppState>,
) -> Result<Vec<ReadingListEntryDto>, String> {
    let status = parse_status(&dto.status).to_error_response()?;

    state
        .reading_list_service
        .add_or_update(&dto.series_slug, &dto.title, status, dto.last_chapter_id.as_deref())
        .await
        .map(to_dtos)
        .to_error_response()
}

#[tauri::command]
pub async fn update_reading_status(
    series_slug: String,
    status: String,
    state: State<'_, AppState>,
) -> Result<Vec<ReadingListEntryDto>, String> {
    let status = parse_status(&status).to_error_response()?;

    state
        .reading_list_service
        .set_status(&series_slug, status)
        .await
        .map(to_dtos)
        .to_error_response()
}

#[tauri::command]
pub async fn update_last_chapter(
    series_slug: String,
    chapter_id: String,
    state: State<'_, AppState>,
) -> Result<Vec<ReadingListEntryDto>, String> {
    state
        .reading_list_service
        .set_last_chapter(&series_slug, &chapter_id)
        .await
        .map(to_dtos)
        .to_error_response()
}

#[tauri::command]
pub async fn remove_from_reading_list(
    series_slug: String,
    state: State<'_, AppState>,
) -> Result<Vec<ReadingListEntryDto>, String> {
    state
        .reading_list_service
        .remove(&series_slug)
        .await
        .map(to_dtos)
        .to_error_response()
}

// src/application/commands/bookmark_commands.rs

use tauri::State;

use crate::application::{dto::*, error_handling::ToErrorResponse, state::AppState};
use crate::domain::Bookmark;

fn to_dtos(bookmarks: Vec<Bookmark>) -> Vec<BookmarkDto> {
    bookmarks.into_iter().map(BookmarkDto::from).collect()
}

#[tauri::command]
pub async fn list_bookmarks(state: State<'_, AppState>) -> Result<Vec<BookmarkDto>, String> {
    state
        .bookmark_service
        .fetch_all()
        .await
        .map(to_dtos)
        .to_error_response()
}

#[tauri::command]
pub async fn add_bookmark(
    dto: AddBookmarkDto,
    state: State<'_, AppState>,
) -> Result<Vec<BookmarkDto>, String> {
    state
        .bookmark_service
        .add(&dto.series_slug, &dto.chapter_id, dto.page)
        .await
        .map(to_dtos)
        .to_error_response()
}

#[tauri::command]
pub async fn remove_bookmark(
    series_slug: String,
    chapter_id: String,
    state: State<'_, AppState>,
) -> Result<Vec<BookmarkDto>, String> {
    state
        .bookmark_service
        .remove(&series_slug, &chapter_id)
        .await
        .map(to_dtos)
        .to_error_response()
}

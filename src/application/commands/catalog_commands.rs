// src/application/commands/catalog_commands.rs

use tauri::State;

use crate::application::{dto::*, error_handling::ToErrorResponse, state::AppState};
use crate::integrations::SearchPage;
use crate::services::OpenChapterRequest;

#[tauri::command]
pub async fn search_manga(
    query: String,
    page: Option<u32>,
    state: State<'_, AppState>,
) -> Result<SearchPage, String> {
    state
        .catalog_service
        .search(&query, page.unwrap_or(1))
        .await
        .to_error_response()
}

/// Series details with the user's reading-list entry and history for it
#[tauri::command]
pub async fn get_manga_details(
    series_slug: String,
    state: State<'_, AppState>,
) -> Result<SeriesPageDto, String> {
    let details = state
        .catalog_service
        .series_details(&series_slug)
        .await
        .to_error_response()?;

    Ok(SeriesPageDto {
        details,
        reading_list_entry: state
            .reading_list_service
            .entry_for(&series_slug)
            .map(ReadingListEntryDto::from),
        history: state
            .history_service
            .list_recent_for_series(&series_slug)
            .into_iter()
            .map(HistoryEntryDto::from)
            .collect(),
    })
}

#[tauri::command]
pub async fn open_chapter(
    request: OpenChapterRequest,
    state: State<'_, AppState>,
) -> Result<ReaderPageDto, String> {
    let chapter = state
        .catalog_service
        .open_chapter(request)
        .await
        .to_error_response()?;

    let bookmarked_page = state
        .bookmark_service
        .bookmark_for(&chapter.series_slug, &chapter.chapter_id)
        .map(|bookmark| bookmark.page);

    Ok(ReaderPageDto {
        chapter,
        bookmarked_page,
    })
}

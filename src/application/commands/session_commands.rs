// src/application/commands/session_commands.rs

use tauri::State;

use crate::application::{dto::*, error_handling::ToErrorResponse, state::AppState};
use crate::services::SignUpResult;

/// Restore the persisted session and load the remote trackers for it
#[tauri::command]
pub async fn restore_session(state: State<'_, AppState>) -> Result<Option<IdentityDto>, String> {
    let identity = state.session_service.initialize().await.to_error_response()?;
    if identity.is_some() {
        state.refresh_remote_trackers().await;
    }
    Ok(identity.map(IdentityDto::from))
}

#[tauri::command]
pub async fn sign_in(
    dto: CredentialsDto,
    state: State<'_, AppState>,
) -> Result<IdentityDto, String> {
    let identity = state
        .session_service
        .sign_in(&dto.email, &dto.password)
        .await
        .to_error_response()?;

    state.refresh_remote_trackers().await;
    Ok(IdentityDto::from(identity))
}

#[tauri::command]
pub async fn sign_up(
    dto: CredentialsDto,
    state: State<'_, AppState>,
) -> Result<SignUpResult, String> {
    let result = state
        .session_service
        .sign_up(&dto.email, &dto.password)
        .await
        .to_error_response()?;

    if matches!(result, SignUpResult::SignedIn { .. }) {
        state.refresh_remote_trackers().await;
    }
    Ok(result)
}

#[tauri::command]
pub async fn sign_out(state: State<'_, AppState>) -> Result<(), String> {
    state.session_service.sign_out().await.to_error_response()
}

#[tauri::command]
pub fn current_identity(state: State<'_, AppState>) -> Option<IdentityDto> {
    state
        .session_service
        .current_identity()
        .map(IdentityDto::from)
}

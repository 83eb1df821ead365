// src/main.rs
//
// Desktop entry point: logging, configuration, database, state, Tauri.

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mangahub::application::commands::{
    bookmark_commands, catalog_commands, history_commands, reading_list_commands,
    session_commands, statistics_commands,
};
use mangahub::db::{
    create_connection_pool, get_connection, get_database_path, initialize_database,
    verify_database_integrity,
};
use mangahub::{AppConfig, AppState};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mangahub=info,reqwest=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    // .env.local overrides .env; neither is required
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    init_logging();

    // 1. CONFIGURATION
    let config = AppConfig::load();
    config.validate().context("invalid configuration")?;

    // 2. DATABASE
    let db_path = get_database_path(config.data_dir.as_deref())
        .context("failed to resolve the data directory")?;
    let pool = Arc::new(create_connection_pool(&db_path).context("failed to open the database")?);
    {
        let conn = get_connection(&pool).context("failed to get a database connection")?;
        initialize_database(&conn).context("failed to initialize the schema")?;
        verify_database_integrity(&conn).context("local database is corrupt")?;
    }
    log::info!("Database ready at {}", db_path.display());

    // 3. APPLICATION STATE
    let app_state = AppState::build(&config, pool).context("failed to build application state")?;
    tauri::async_runtime::block_on(app_state.start()).context("startup failed")?;

    // 4. TAURI BOOTSTRAP
    tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            session_commands::restore_session,
            session_commands::sign_in,
            session_commands::sign_up,
            session_commands::sign_out,
            session_commands::current_identity,
            history_commands::record_history,
            history_commands::list_history,
            history_commands::list_series_history,
            history_commands::clear_history,
            bookmark_commands::list_bookmarks,
            bookmark_commands::add_bookmark,
            bookmark_commands::remove_bookmark,
            reading_list_commands::list_reading_list,
            reading_list_commands::save_reading_list_entry,
            reading_list_commands::update_reading_status,
            reading_list_commands::update_last_chapter,
            reading_list_commands::remove_from_reading_list,
            catalog_commands::search_manga,
            catalog_commands::get_manga_details,
            catalog_commands::open_chapter,
            statistics_commands::get_dashboard,
        ])
        .run(tauri::generate_context!())
        .context("error while running the Tauri application")?;

    Ok(())
}

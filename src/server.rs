use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::library;

/// Shared state for the listing handler.
#[derive(Clone)]
struct AppContext {
    audio_dir: PathBuf,
}

#[derive(Serialize)]
struct AudioFileEntry {
    name: String,
    path: String,
    size: u64,
}

/// Serve the working directory as static files plus a read-only listing
/// endpoint for the audio library, with permissive CORS for the web
/// player.
pub async fn run(audio_dir: PathBuf, port: u16) -> Result<()> {
    let ctx = AppContext { audio_dir };

    let app = Router::new()
        .route("/api/list-audio-files", get(list_audio_files))
        .with_state(ctx)
        .fallback_service(ServeDir::new("."))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Serving library at http://localhost:{}/", port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// The directory is re-read on every request so the listing tracks the
/// library as files come and go. A missing or unreadable directory is an
/// empty library, not an error.
async fn list_audio_files(State(ctx): State<AppContext>) -> Json<Vec<AudioFileEntry>> {
    let files = match library::list_audio_files(&ctx.audio_dir) {
        Ok(files) => files,
        Err(err) => {
            log::warn!("Failed to list audio files: {:#}", err);
            return Json(Vec::new());
        }
    };

    let dir_name = ctx.audio_dir.display();
    let entries = files
        .iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            let size = std::fs::metadata(path).ok()?.len();
            Some(AudioFileEntry {
                path: format!("/{}/{}", dir_name, name),
                name,
                size,
            })
        })
        .collect();

    Json(entries)
}

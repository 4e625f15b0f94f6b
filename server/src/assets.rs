//! Static files for the browser client, with a single-page-app fallback.
//!
//! Anything outside `/api` that names a file under the public directory is
//! served as-is; everything else gets `index.html` so the client can route.

use std::path::{Component, Path, PathBuf};

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::AppState;

const INDEX: &str = "index.html";

pub async fn serve(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let root = state.public_dir();
    if let Some(path) = resolve(root, uri.path()) {
        if let Ok(bytes) = tokio::fs::read(&path).await {
            return file_response(&path, bytes);
        }
    }

    let index = root.join(INDEX);
    match tokio::fs::read(&index).await {
        Ok(bytes) => file_response(&index, bytes),
        Err(err) => {
            tracing::warn!(path = %index.display(), error = %err, "client entry page missing");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}

/// Map a request path onto `root`, refusing anything that could climb out
/// of it. `None` means "use the entry page".
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    let mut resolved = root.to_path_buf();
    let mut depth = 0;
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                resolved.push(segment);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (depth > 0).then_some(resolved)
}

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn file_response(path: &Path, bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, content_type(path))], bytes).into_response()
}

//! Static file serving for the price page
//!
//! Serves embedded asset files using rust-embed

use axum::{
    body::Body,
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Page template with `{{...}}` placeholders
pub const PAGE_TEMPLATE: &str = "index.html";

/// Read an embedded asset as UTF-8 text
pub fn asset_text(name: &str) -> Option<String> {
    Assets::get(name).map(|content| String::from_utf8_lossy(&content.data).into_owned())
}

/// Serve a file from the embedded assets
pub async fn serve_asset(Path(path): Path<String>) -> impl IntoResponse {
    let path = path.trim_start_matches('/');

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string();

            ([(header::CONTENT_TYPE, mime)], content.data.into_owned()).into_response()
        }
        None => not_found(),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        Body::from("Not Found"),
    )
        .into_response()
}

use askama_axum::IntoResponse;
use axum::{
    body::{boxed, Full},
    http::{header, StatusCode, Uri},
    response::Response,
};
use rust_embed::RustEmbed;

use super::error;

pub async fn static_handler(uri: Uri) -> impl IntoResponse {
    let path = uri
        .path()
        .trim_start_matches('/')
        .trim_start_matches("static/")
        .to_string();
    StaticFile(path)
}

#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticFiles;

pub struct StaticFile<T>(pub T);

impl<T> IntoResponse for StaticFile<T>
where
    T: Into<String>,
{
    fn into_response(self) -> Response {
        let path = self.0.into();

        match StaticFiles::get(path.as_str()) {
            Some(content) => {
                let body = boxed(Full::from(content.data));
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                Response::builder()
                    .header(header::CONTENT_TYPE, mime.as_ref())
                    .body(body)
                    .unwrap()
            }
            None => Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(boxed(Full::from(error::HTML_404)))
                .unwrap(),
        }
    }
}

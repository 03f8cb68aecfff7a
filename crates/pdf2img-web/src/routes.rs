//! HTTP handlers.
//!
//! Each `POST /convert` is one self-contained session: the upload and the
//! chosen orientation arrive in the same request, and the response carries
//! every artifact inline.

use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::Multipart;
use pdf2img::{run_session, RequestContext};
use std::sync::Arc;
use tracing::info;

use crate::helpers::{conversion_error, parse_orientation, ResultExt, RouteResult};
use crate::state::AppState;
use crate::templates::{IndexTemplate, ResultTemplate};

/// Landing page.
pub async fn index() -> IndexTemplate {
    IndexTemplate::default()
}

/// Convert an uploaded PDF and render the result page.
///
/// Expects multipart fields `file` (the PDF) and `orientation`
/// (`Horizontal` or `Vertical`, default `Horizontal`).
pub async fn convert(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> RouteResult<ResultTemplate> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut orientation_label: Option<String> = None;

    while let Some(field) = multipart.next_field().await.or_bad_request()? {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field.file_name().unwrap_or("document.pdf").to_string();
                let data = field.bytes().await.or_bad_request()?;
                upload = Some((file_name, data.to_vec()));
            }
            "orientation" => {
                orientation_label = Some(field.text().await.or_bad_request()?);
            }
            _ => {}
        }
    }

    let (file_name, pdf_bytes) =
        upload.ok_or_else(|| (StatusCode::BAD_REQUEST, "No file uploaded".to_string()))?;
    let orientation = parse_orientation(orientation_label.as_deref())?;
    info!(
        "Received '{}' ({} bytes), {} collage",
        file_name,
        pdf_bytes.len(),
        orientation.as_str()
    );

    let ctx = RequestContext::new(file_name, pdf_bytes, orientation);
    let output = run_session(ctx, &state.config)
        .await
        .map_err(conversion_error)?;

    Ok(ResultTemplate::from_output(
        &output,
        state.config.max_collage_images,
    ))
}

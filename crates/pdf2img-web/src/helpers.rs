//! Helper types and traits for route handlers.
//!
//! Converts `Result` and `Pdf2ImgError` values into HTTP-appropriate error
//! responses so handlers can stay on the `?` path.

use axum::http::StatusCode;
use pdf2img::{Orientation, Pdf2ImgError};
use tracing::error;

/// Standard result type for route handlers returning HTML.
pub type RouteResult<T> = Result<T, (StatusCode, String)>;

/// Extension trait for converting `Result<T, E>` to `RouteResult<T>`.
pub trait ResultExt<T, E: std::fmt::Display> {
    /// Converts the error to 400 Bad Request.
    fn or_bad_request(self) -> RouteResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn or_bad_request(self) -> RouteResult<T> {
        self.map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
    }
}

/// Map a conversion failure onto a status and a message safe to show users.
///
/// Decode failures describe what was wrong with the upload. Everything else
/// is logged in full and reported generically.
pub fn conversion_error(err: Pdf2ImgError) -> (StatusCode, String) {
    match err {
        Pdf2ImgError::Decode { .. } => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        _ if err.is_user_error() => (StatusCode::BAD_REQUEST, err.to_string()),
        other => {
            error!("Conversion failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The PDF could not be converted because of a server error.".to_string(),
            )
        }
    }
}

/// Parse the orientation radio value (`Horizontal` / `Vertical`).
///
/// The submitted label is lower-cased before parsing; an absent or blank value
/// falls back to the default orientation.
pub fn parse_orientation(label: Option<&str>) -> RouteResult<Orientation> {
    match label.map(str::trim) {
        None | Some("") => Ok(Orientation::default()),
        Some(label) => label.to_lowercase().parse::<Orientation>().or_bad_request(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radio_labels_parse_case_insensitively() {
        assert_eq!(parse_orientation(Some("Horizontal")).unwrap(), Orientation::Horizontal);
        assert_eq!(parse_orientation(Some("Vertical")).unwrap(), Orientation::Vertical);
        assert_eq!(parse_orientation(Some(" vertical ")).unwrap(), Orientation::Vertical);
    }

    #[test]
    fn missing_orientation_defaults_to_horizontal() {
        assert_eq!(parse_orientation(None).unwrap(), Orientation::Horizontal);
        assert_eq!(parse_orientation(Some("")).unwrap(), Orientation::Horizontal);
    }

    #[test]
    fn unknown_orientation_is_bad_request() {
        let (status, msg) = parse_orientation(Some("Diagonal")).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(msg.contains("diagonal"));
    }

    #[test]
    fn decode_errors_are_unprocessable() {
        let (status, msg) = conversion_error(Pdf2ImgError::Decode {
            detail: "not a PDF".into(),
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(msg.contains("not a PDF"));
    }

    #[test]
    fn storage_errors_hide_details() {
        let err = Pdf2ImgError::Storage {
            path: "/tmp/secret/page_1.png".into(),
            source: std::io::Error::other("disk full"),
        };
        let (status, msg) = conversion_error(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!msg.contains("secret"));
        assert!(!msg.contains("disk full"));
    }

    #[test]
    fn result_ext_maps_to_bad_request() {
        let r: Result<(), &str> = Err("boom");
        assert_eq!(r.or_bad_request().unwrap_err(), (StatusCode::BAD_REQUEST, "boom".into()));
    }
}

//! Askama templates.
//!
//! - `base.html` - common layout and CSS
//! - `index.html` - upload form with the orientation selector
//! - `result.html` - page gallery, download links and the collage
//!
//! Every image and download is embedded as a `data:` URI, so a rendered
//! result page is self-contained and nothing is kept server-side.

use askama::Template;
use askama_web::WebTemplate;
use pdf2img::{Orientation, SessionOutput};

/// One selectable orientation on the upload form.
pub struct OrientationChoice {
    pub label: &'static str,
    pub checked: bool,
}

/// Landing page with the upload form.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub orientations: Vec<OrientationChoice>,
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self {
            orientations: Orientation::ALL
                .iter()
                .map(|o| OrientationChoice {
                    label: o.label(),
                    checked: *o == Orientation::default(),
                })
                .collect(),
        }
    }
}

/// A rendered page as shown in the gallery.
pub struct PageView {
    pub page_num: usize,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub data_uri: String,
}

/// Result page after a successful conversion.
#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub source_name: String,
    pub page_count: usize,
    pub archive_name: String,
    pub archive_uri: String,
    pub pages: Vec<PageView>,
    pub collage_name: String,
    pub collage_uri: String,
    pub collage_caption: String,
}

impl ResultTemplate {
    /// `collage_limit` is the configured number of leading pages in the collage.
    pub fn from_output(output: &SessionOutput, collage_limit: usize) -> Self {
        let pages = output
            .pages
            .iter()
            .map(|p| PageView {
                page_num: p.page_num,
                file_name: p.download.file_name.clone(),
                width: p.width,
                height: p.height,
                data_uri: p.download.data_uri(),
            })
            .collect();

        Self {
            source_name: output.source_name.clone(),
            page_count: output.pages.len(),
            archive_name: output.archive.file_name.clone(),
            archive_uri: output.archive.data_uri(),
            pages,
            collage_name: output.collage.file_name.clone(),
            collage_uri: output.collage.data_uri(),
            collage_caption: format!(
                "Collage of first {} pages ({})",
                collage_limit,
                output.orientation.label()
            ),
        }
    }
}

//! Download the release archive and pull the library out of it.

use crate::SetupError;
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use tar::Archive;

const CHUNK: usize = 64 * 1024;
const EXPECTED_SIZE: u64 = 35 * 1024 * 1024;

/// Stream `url` into memory, reporting `(downloaded, total)` after each chunk.
pub fn download(url: &str, on_progress: Option<&dyn Fn(u64, Option<u64>)>) -> Result<Vec<u8>, SetupError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("pdfium-setup/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SetupError::Download(e.to_string()))?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|e| SetupError::Download(format!("GET {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(SetupError::Download(format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }

    let total = response.content_length();
    let mut buf = Vec::with_capacity(total.unwrap_or(EXPECTED_SIZE) as usize);
    let mut chunk = vec![0u8; CHUNK];
    let mut downloaded: u64 = 0;

    loop {
        match response.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                downloaded += n as u64;
                if let Some(cb) = on_progress {
                    cb(downloaded, total);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SetupError::Download(format!("read error: {e}"))),
        }
    }

    Ok(buf)
}

/// Unpack `member` from a `.tgz` held in memory into `dest`.
pub fn extract(archive_bytes: &[u8], member: &str, dest: &Path) -> Result<(), SetupError> {
    let mut archive = Archive::new(GzDecoder::new(archive_bytes));
    let entries = archive
        .entries()
        .map_err(|e| SetupError::Extract(e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| SetupError::Extract(e.to_string()))?;
        let is_member = entry
            .path()
            .map_err(|e| SetupError::Extract(e.to_string()))?
            .to_string_lossy()
            == member;

        if is_member {
            entry
                .unpack(dest)
                .map_err(|e| SetupError::Extract(format!("unpack failed: {e}")))?;
            return Ok(());
        }
    }

    Err(SetupError::Extract(format!("'{member}' not found in archive")))
}

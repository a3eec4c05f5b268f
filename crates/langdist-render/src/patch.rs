//! Document patcher: replaces the text between two markers.
//!
//! Everything between the end of the first start marker and the first end
//! marker after it is replaced; the markers themselves are kept so the next
//! run can find them again.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("marker not found: {0}")]
    MissingMarker(String),
    #[error("end marker appears before start marker")]
    MarkersOutOfOrder,
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Splice `body` between `start_marker` and `end_marker` in `document`.
pub fn patch(
    document: &str,
    start_marker: &str,
    end_marker: &str,
    body: &str,
) -> Result<String, PatchError> {
    let start = document
        .find(start_marker)
        .ok_or_else(|| PatchError::MissingMarker(start_marker.to_string()))?;
    let content_start = start + start_marker.len();

    let end = match document[content_start..].find(end_marker) {
        Some(offset) => content_start + offset,
        None if document.contains(end_marker) => return Err(PatchError::MarkersOutOfOrder),
        None => return Err(PatchError::MissingMarker(end_marker.to_string())),
    };

    let mut out = String::with_capacity(document.len() + body.len());
    out.push_str(&document[..content_start]);
    out.push('\n');
    out.push_str(body);
    out.push('\n');
    out.push_str(&document[end..]);
    Ok(out)
}

/// Patch the file at `path` in place. Returns `true` when the file changed;
/// an unchanged file is not rewritten.
pub fn patch_file(
    path: &Path,
    start_marker: &str,
    end_marker: &str,
    body: &str,
) -> Result<bool, PatchError> {
    let io_err = |source| PatchError::Io {
        path: path.display().to_string(),
        source,
    };

    let document = std::fs::read_to_string(path).map_err(io_err)?;
    let patched = patch(&document, start_marker, end_marker, body)?;
    if patched == document {
        tracing::info!(path = %path.display(), "document already up to date");
        return Ok(false);
    }
    std::fs::write(path, patched).map_err(io_err)?;
    tracing::info!(path = %path.display(), "document patched");
    Ok(true)
}

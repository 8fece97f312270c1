use anyhow::Context;
use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::state::AppState;
use crate::storage::UploadStore;

/// Extension check against the configured allow-list. The extension is the
/// text after the last `.`, compared case-insensitively; a name without a
/// `.` never matches.
pub fn allowed_extension(filename: &str, allowed: &[String]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Reduce an uploaded filename to something safe to join onto the upload
/// directory: path separators become spaces, whitespace runs collapse to
/// `_`, anything outside `[A-Za-z0-9_.-]` is dropped, and leading/trailing
/// `.`/`_` are stripped. Can end up empty for garbage input.
pub fn sanitize_filename(raw: &str) -> String {
    lazy_static! {
        static ref UNSAFE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
    }
    let spaced = raw.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    UNSAFE_CHARS
        .replace_all(&joined, "")
        .trim_matches(&['.', '_'][..])
        .to_string()
}

/// Save an uploaded picture if its extension is allowed. Returns the
/// sanitized filename to store on the user row, or `None` when the file is
/// rejected; rejection is not an error.
pub async fn store_picture(
    state: &AppState,
    filename: &str,
    body: Bytes,
) -> anyhow::Result<Option<String>> {
    if !allowed_extension(filename, &state.config.allowed_extensions) {
        debug!(%filename, "upload rejected by extension allow-list");
        return Ok(None);
    }
    let name = sanitize_filename(filename);
    if name.is_empty() {
        debug!(%filename, "upload rejected, filename sanitized to nothing");
        return Ok(None);
    }
    state
        .uploads
        .save(&name, body)
        .await
        .with_context(|| format!("save upload {}", name))?;
    Ok(Some(name))
}

//! Output path derivation.
//!
//! Every operation names its output after the input: the extension is
//! stripped from the file name and an operation suffix plus a new extension
//! is appended (`/videos/clip.mov` -> `/videos/clip_trim.mp4`). Only the final
//! path component is inspected, so dots in directory names never matter.

use std::path::{Path, PathBuf};

use cf_core::config::ExtensionStrategy;

/// The path as UTF-8 text, the only form an engine argument can carry.
///
/// # Errors
///
/// Returns [`cf_core::Error::InvalidPath`] when any component of `path` is
/// not valid UTF-8.
pub fn utf8_path(path: &Path) -> cf_core::Result<&str> {
    path.to_str()
        .ok_or_else(|| cf_core::Error::invalid_path(path, "path is not valid UTF-8"))
}

/// Strip the extension from the file name of `path`.
///
/// # Errors
///
/// Returns [`cf_core::Error::InvalidPath`] when the path is not valid UTF-8,
/// has no file name, contains no `.` in its file name, or would leave an
/// empty stem (`.mov`).
pub fn strip_extension(path: &Path, strategy: ExtensionStrategy) -> cf_core::Result<PathBuf> {
    utf8_path(path)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| cf_core::Error::invalid_path(path, "no file name"))?
        .to_str()
        .ok_or_else(|| cf_core::Error::invalid_path(path, "file name is not valid UTF-8"))?;

    let dot = match strategy {
        ExtensionStrategy::LastSeparator => file_name.rfind('.'),
        ExtensionStrategy::FirstSeparator => file_name.find('.'),
    }
    .ok_or_else(|| cf_core::Error::invalid_path(path, "file name has no extension"))?;

    if dot == 0 {
        return Err(cf_core::Error::invalid_path(path, "file name has an empty stem"));
    }

    Ok(path.with_file_name(&file_name[..dot]))
}

/// Append `suffix` to an already-stripped base path without touching any dot
/// it may still contain.
pub fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// Derive `<stem>_<tag>.<ext>` next to `path`.
pub fn derive_output(
    path: &Path,
    strategy: ExtensionStrategy,
    tag: &str,
    ext: &str,
) -> cf_core::Result<PathBuf> {
    let base = strip_extension(path, strategy)?;
    Ok(with_suffix(&base, &format!("_{tag}.{ext}")))
}

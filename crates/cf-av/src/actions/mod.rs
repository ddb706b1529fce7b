//! Media operations: thumbnails, frame extraction, trim, compress, reverse,
//! merge, boomerang, and speed change.
//!
//! Each operation derives its output path from the input, builds an ffmpeg
//! argument vector, runs it through an [`crate::Engine`] once, and returns the
//! output path. Composite operations call the simple ones in sequence.

mod boomerang;
mod compress;
mod merge;
mod reverse;
mod speed;
mod thumbnail;
mod trim;

pub use boomerang::boomerang;
pub use compress::compress;
pub use merge::{merge, MergeSize};
pub use reverse::reverse;
pub use speed::set_speed;
pub use thumbnail::{extract_frames, thumbnail};
pub use trim::trim;

use std::path::Path;

/// Render a number the way it should appear on an ffmpeg command line:
/// shortest round-trip form, no trailing `.0` (`2.0` -> `2`, `0.5` -> `0.5`).
pub(crate) fn fmt_num(value: f64) -> String {
    value.to_string()
}

/// String form of a path for use as a command-line argument. Callers check
/// paths with [`crate::paths::utf8_path`] first, so nothing is lost here.
pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.3333333333333333");
    }
}

//! Frame sampling: a single thumbnail or a numbered image sequence.

use std::path::{Path, PathBuf};

use cf_core::config::Config;

use super::{fmt_num, path_arg};
use crate::engine::{Engine, Tool};
use crate::paths::{strip_extension, with_suffix};

/// Sample frames at `fps` and return the path of the first image.
///
/// ffmpeg writes `<stem>_thumb_1.<img>`, `<stem>_thumb_2.<img>`, ...; only the
/// first is returned, whatever the number actually produced. Use
/// [`extract_frames`] to work with the whole sequence.
pub async fn thumbnail(
    engine: &dyn Engine,
    config: &Config,
    input: &Path,
    fps: f64,
) -> cf_core::Result<PathBuf> {
    let base = strip_extension(input, config.output.extension_strategy)?;
    let ext = &config.output.image_extension;

    tracing::info!("thumbnail {:?} at {} fps", input, fmt_num(fps));

    let args = thumbnail_args(input, &base, fps, ext);
    engine.run(Tool::Ffmpeg, args).await?;

    Ok(with_suffix(&base, &format!("_thumb_1.{ext}")))
}

/// Sample frames at `fps` and return the shared filename prefix
/// (`<stem>_thumb_`). The caller enumerates the numbered files.
pub async fn extract_frames(
    engine: &dyn Engine,
    config: &Config,
    input: &Path,
    fps: f64,
) -> cf_core::Result<PathBuf> {
    let base = strip_extension(input, config.output.extension_strategy)?;

    tracing::info!("extract frames {:?} at {} fps", input, fmt_num(fps));

    let args = extract_frames_args(
        input,
        &base,
        fps,
        &config.encoding.preset,
        &config.output.image_extension,
    );
    engine.run(Tool::Ffmpeg, args).await?;

    Ok(with_suffix(&base, "_thumb_"))
}

/// `<base>_thumb_%01d.<ext>` for the image2 muxer, which reads every `%` as a
/// directive; literal ones in the base or extension are doubled.
fn sequence_pattern(base: &Path, ext: &str) -> String {
    let literal = |s: &str| s.replace('%', "%%");
    format!("{}_thumb_%01d.{}", literal(&path_arg(base)), literal(ext))
}

fn thumbnail_args(input: &Path, base: &Path, fps: f64, ext: &str) -> Vec<String> {
    vec![
        "-i".into(),
        path_arg(input),
        "-vf".into(),
        format!("fps={}", fmt_num(fps)),
        sequence_pattern(base, ext),
    ]
}

fn extract_frames_args(input: &Path, base: &Path, fps: f64, preset: &str, ext: &str) -> Vec<String> {
    vec![
        "-y".into(),
        "-i".into(),
        path_arg(input),
        "-vf".into(),
        format!("fps={}", fmt_num(fps)),
        "-preset".into(),
        preset.into(),
        sequence_pattern(base, ext),
    ]
}

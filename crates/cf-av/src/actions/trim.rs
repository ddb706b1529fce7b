//! Sub-range extraction.

use std::path::{Path, PathBuf};

use cf_core::config::{Config, EncodingConfig};

use super::{fmt_num, path_arg};
use crate::engine::{Engine, Tool};
use crate::paths::derive_output;

/// Cut `duration` seconds starting at `start` (seconds) into
/// `<stem>_trim.<ext>`, re-encoding with the configured fast settings.
/// An existing output is overwritten.
pub async fn trim(
    engine: &dyn Engine,
    config: &Config,
    input: &Path,
    start: f64,
    duration: f64,
) -> cf_core::Result<PathBuf> {
    let output = derive_output(
        input,
        config.output.extension_strategy,
        "trim",
        &config.output.video_extension,
    )?;

    tracing::info!(
        "trim {:?} -> {:?} (start={}s, duration={}s)",
        input,
        output,
        fmt_num(start),
        fmt_num(duration)
    );

    let args = trim_args(input, &output, start, duration, &config.encoding);
    engine.run(Tool::Ffmpeg, args).await?;

    Ok(output)
}

fn trim_args(
    input: &Path,
    output: &Path,
    start: f64,
    duration: f64,
    encoding: &EncodingConfig,
) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-i".into(),
        path_arg(input),
        "-ss".into(),
        fmt_num(start),
        "-t".into(),
        fmt_num(duration),
    ];
    args.extend(encode_args(encoding));
    args.push(path_arg(output));
    args
}

/// `-c:v <codec> -preset <preset> -pix_fmt <fmt>`, shared with compress.
pub(super) fn encode_args(encoding: &EncodingConfig) -> Vec<String> {
    vec![
        "-c:v".into(),
        encoding.video_codec.clone(),
        "-preset".into(),
        encoding.preset.clone(),
        "-pix_fmt".into(),
        encoding.pixel_format.clone(),
    ]
}

//! Height-capped downscaling.

use std::path::{Path, PathBuf};

use cf_core::config::{Config, EncodingConfig};

use super::path_arg;
use super::trim::encode_args;
use crate::engine::{Engine, Tool};
use crate::paths::derive_output;

/// Downscale to at most `height` pixels tall into `<stem>_compress.<ext>`.
///
/// The scale expression is `min(height, ih)`, so sources already shorter than
/// `height` keep their size. Width follows the aspect ratio, rounded to an
/// even number.
pub async fn compress(
    engine: &dyn Engine,
    config: &Config,
    input: &Path,
    height: u32,
) -> cf_core::Result<PathBuf> {
    let output = derive_output(
        input,
        config.output.extension_strategy,
        "compress",
        &config.output.video_extension,
    )?;

    tracing::info!("compress {:?} -> {:?} (max height {height})", input, output);

    let args = compress_args(input, &output, height, &config.encoding);
    engine.run(Tool::Ffmpeg, args).await?;

    Ok(output)
}

/// The single quotes keep the comma inside `min()` from splitting the filter
/// chain.
fn scale_filter(height: u32) -> String {
    format!("scale=-2:'min({height},ih)'")
}

fn compress_args(input: &Path, output: &Path, height: u32, encoding: &EncodingConfig) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-i".into(),
        path_arg(input),
        "-vf".into(),
        scale_filter(height),
    ];
    args.extend(encode_args(encoding));
    args.push(path_arg(output));
    args
}

//! Playback speed change.

use std::path::{Path, PathBuf};

use cf_core::config::Config;

use super::{fmt_num, path_arg};
use crate::engine::{Engine, Tool};
use crate::paths::derive_output;

/// Range a single `atempo` stage accepts on every ffmpeg version.
const ATEMPO_MIN: f64 = 0.5;
const ATEMPO_MAX: f64 = 2.0;

/// Re-time the video by `speed` (`2` plays twice as fast) into
/// `<stem>_slow.<ext>`.
///
/// Video timestamps are multiplied by `1/speed`. Audio is left at its
/// original pace unless `speed.adjust_audio` is set, so with the default
/// config a clip with sound drifts out of sync for any `speed != 1`.
///
/// # Errors
///
/// Returns [`cf_core::Error::Validation`] unless `speed` is positive and both
/// `speed` and `1/speed` are finite.
pub async fn set_speed(
    engine: &dyn Engine,
    config: &Config,
    input: &Path,
    speed: f64,
) -> cf_core::Result<PathBuf> {
    if !(speed.is_finite() && speed > 0.0 && (1.0 / speed).is_finite()) {
        return Err(cf_core::Error::Validation(format!(
            "speed must be a positive number, got {speed}"
        )));
    }

    let output = derive_output(
        input,
        config.output.extension_strategy,
        "slow",
        &config.output.video_extension,
    )?;

    tracing::info!(
        "set speed {:?} -> {:?} (x{}, adjust_audio={})",
        input,
        output,
        fmt_num(speed),
        config.speed.adjust_audio
    );

    let args = speed_args(input, &output, speed, config.speed.adjust_audio);
    engine.run(Tool::Ffmpeg, args).await?;

    Ok(output)
}

fn speed_args(input: &Path, output: &Path, speed: f64, adjust_audio: bool) -> Vec<String> {
    let mut args = vec![
        "-i".to_string(),
        path_arg(input),
        "-filter:v".into(),
        format!("setpts={}*PTS", fmt_num(1.0 / speed)),
    ];
    if adjust_audio {
        args.push("-filter:a".into());
        args.push(atempo_chain(speed));
    }
    args.push(path_arg(output));
    args
}

/// Express `speed` as a chain of `atempo` stages, each within `[0.5, 2.0]`.
///
/// `speed` must be positive and finite.
fn atempo_chain(speed: f64) -> String {
    let mut stages = Vec::new();
    let mut remaining = speed;
    while remaining > ATEMPO_MAX {
        stages.push(ATEMPO_MAX);
        remaining /= ATEMPO_MAX;
    }
    while remaining < ATEMPO_MIN {
        stages.push(ATEMPO_MIN);
        remaining /= ATEMPO_MIN;
    }
    stages.push(remaining);

    stages
        .into_iter()
        .map(|s| format!("atempo={}", fmt_num(s)))
        .collect::<Vec<_>>()
        .join(",")
}

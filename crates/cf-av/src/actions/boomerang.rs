//! Forward-then-backward playback loop.

use std::path::{Path, PathBuf};

use cf_core::config::Config;

use super::merge::{merge, MergeSize};
use super::reverse::reverse;
use crate::engine::Engine;
use crate::paths::derive_output;

/// Build `<stem>_boomerang.<ext>`: the clip followed by its reversed copy, or
/// the reversed copy first when `reorder` is set.
///
/// Runs [`reverse`] then [`merge`], one after the other. Unless
/// `boomerang.retain_intermediates` is set, the reversed intermediate is
/// removed afterwards, also when the merge failed; a failed removal is only
/// logged.
pub async fn boomerang(
    engine: &dyn Engine,
    config: &Config,
    input: &Path,
    reorder: bool,
) -> cf_core::Result<PathBuf> {
    let output = derive_output(
        input,
        config.output.extension_strategy,
        "boomerang",
        &config.output.video_extension,
    )?;

    tracing::info!("boomerang {:?} -> {:?} (reorder={reorder})", input, output);

    let reversed = reverse(engine, config, input).await?;

    let sequence = if reorder {
        [reversed.clone(), input.to_path_buf()]
    } else {
        [input.to_path_buf(), reversed.clone()]
    };
    let merged = merge(engine, &sequence, &output, MergeSize::from(config.merge)).await;

    if !config.boomerang.retain_intermediates {
        discard_intermediate(&reversed).await;
    }

    merged
}

async fn discard_intermediate(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!("removed intermediate {:?}", path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("failed to remove intermediate {:?}: {e}", path),
    }
}

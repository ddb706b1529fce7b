//! Frame-order reversal.

use std::path::{Path, PathBuf};

use cf_core::config::Config;

use super::path_arg;
use crate::engine::{Engine, Tool};
use crate::paths::derive_output;

/// Reverse the frame order into `<stem>_reverse.<ext>` with the engine's
/// default encoder settings.
///
/// No overwrite flag is passed: if the output already exists the engine
/// refuses and this fails with [`cf_core::Error::Tool`].
pub async fn reverse(engine: &dyn Engine, config: &Config, input: &Path) -> cf_core::Result<PathBuf> {
    let output = derive_output(
        input,
        config.output.extension_strategy,
        "reverse",
        &config.output.video_extension,
    )?;

    tracing::info!("reverse {:?} -> {:?}", input, output);

    let args = vec![
        "-i".into(),
        path_arg(input),
        "-vf".into(),
        "reverse".into(),
        path_arg(&output),
    ];
    engine.run(Tool::Ffmpeg, args).await?;

    Ok(output)
}

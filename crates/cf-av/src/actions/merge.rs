//! Concatenation of several clips into one container.

use std::path::{Path, PathBuf};

use cf_core::config::MergeConfig;
use serde::{Deserialize, Serialize};

use super::path_arg;
use crate::engine::{Engine, Tool};
use crate::paths::utf8_path;

/// Frame size every merge input is scaled to before concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSize {
    pub width: u32,
    pub height: u32,
}

impl Default for MergeSize {
    fn default() -> Self {
        MergeConfig::default().into()
    }
}

impl From<MergeConfig> for MergeSize {
    fn from(cfg: MergeConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
        }
    }
}

/// Concatenate `inputs` in order into `output`.
///
/// Every input is scaled to `size` with a square sample aspect ratio, then
/// video and audio of all inputs are joined in sequence. Each input must carry
/// both a video and an audio stream; this is not checked here, the engine
/// rejects the filter graph otherwise. An existing output is overwritten.
///
/// # Errors
///
/// Returns [`cf_core::Error::Validation`] for an empty input list and
/// [`cf_core::Error::InvalidPath`] for a path that is not valid UTF-8, both
/// before the engine is involved.
pub async fn merge(
    engine: &dyn Engine,
    inputs: &[PathBuf],
    output: &Path,
    size: MergeSize,
) -> cf_core::Result<PathBuf> {
    if inputs.is_empty() {
        return Err(cf_core::Error::Validation(
            "merge needs at least one input".into(),
        ));
    }

    for path in inputs.iter().map(PathBuf::as_path).chain([output]) {
        utf8_path(path)?;
    }

    tracing::info!(
        "merge {} inputs -> {:?} ({}x{})",
        inputs.len(),
        output,
        size.width,
        size.height
    );

    let args = merge_args(inputs, output, size);
    engine.run(Tool::Ffmpeg, args).await?;

    Ok(output.to_path_buf())
}

/// `[0:v]scale=W:H,setsar=1[v0]; ... [v0][0:a][v1][1:a]concat=n=N:v=1:a=1[v][a]`
fn filter_graph(count: usize, size: MergeSize) -> String {
    let mut graph = String::new();
    for i in 0..count {
        graph.push_str(&format!(
            "[{i}:v]scale={}:{},setsar=1[v{i}]; ",
            size.width, size.height
        ));
    }
    for i in 0..count {
        graph.push_str(&format!("[v{i}][{i}:a]"));
    }
    graph.push_str(&format!("concat=n={count}:v=1:a=1[v][a]"));
    graph
}

fn merge_args(inputs: &[PathBuf], output: &Path, size: MergeSize) -> Vec<String> {
    let mut args = vec!["-y".to_string()];
    for input in inputs {
        args.push("-i".into());
        args.push(path_arg(input));
    }
    args.extend([
        "-filter_complex".into(),
        filter_graph(inputs.len(), size),
        "-vsync".into(),
        "2".into(),
        "-map".into(),
        "[v]".into(),
        "-map".into(),
        "[a]".into(),
        path_arg(output),
    ]);
    args
}

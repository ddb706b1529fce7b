//! The [`VideoManager`] facade.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cf_av::actions;
use cf_av::{Engine, FfprobeProber, MergeSize, ProcessEngine, ToolInfo, ToolRegistry};
use cf_core::config::{Config, ToolsConfig};
use cf_core::{MediaInfo, Result, StreamKind};

/// Entry point for every media operation.
///
/// Holds the configuration and the [`Engine`] that runs ffmpeg/ffprobe.
/// Cheap to clone and safe to share between tasks; operations on different
/// files may run concurrently, nothing here serializes them.
///
/// # Example
///
/// ```no_run
/// use clipforge::{Config, VideoManager};
///
/// # async fn example() -> clipforge::Result<()> {
/// let manager = VideoManager::new(Config::default());
/// let trimmed = manager.trim("clip.mov", 2.0, 5.0).await?;
/// assert_eq!(trimmed, std::path::PathBuf::from("clip_trim.mp4"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VideoManager {
    engine: Arc<dyn Engine>,
    config: Arc<Config>,
}

impl VideoManager {
    /// Discover ffmpeg/ffprobe according to `config.tools` and run them as
    /// child processes.
    pub fn new(config: Config) -> Self {
        let engine = ProcessEngine::discover(&config.tools);
        Self::with_engine(Arc::new(engine), config)
    }

    /// Use a caller-supplied engine.
    pub fn with_engine(engine: Arc<dyn Engine>, config: Config) -> Self {
        for warning in config.validate() {
            tracing::warn!("config: {warning}");
        }
        Self {
            engine,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Report which tools are installed and their versions.
    pub fn check_tools(tools: &ToolsConfig) -> Vec<ToolInfo> {
        ToolRegistry::discover(tools).check_all()
    }

    /// Container metadata plus the first video stream.
    pub async fn probe(&self, path: impl AsRef<Path>) -> Result<MediaInfo> {
        FfprobeProber::new(self.engine.as_ref())
            .probe(path.as_ref())
            .await
    }

    /// Container metadata plus the first stream of `kind`.
    pub async fn probe_stream(&self, path: impl AsRef<Path>, kind: StreamKind) -> Result<MediaInfo> {
        FfprobeProber::new(self.engine.as_ref())
            .probe_stream(path.as_ref(), kind)
            .await
    }

    /// Path of the first sampled frame (`<stem>_thumb_1.jpg`).
    pub async fn thumbnail(&self, path: impl AsRef<Path>, fps: f64) -> Result<PathBuf> {
        actions::thumbnail(self.engine.as_ref(), &self.config, path.as_ref(), fps).await
    }

    /// Filename prefix of the sampled frame sequence (`<stem>_thumb_`).
    pub async fn extract_frames(&self, path: impl AsRef<Path>, fps: f64) -> Result<PathBuf> {
        actions::extract_frames(self.engine.as_ref(), &self.config, path.as_ref(), fps).await
    }

    pub async fn trim(&self, path: impl AsRef<Path>, start: f64, duration: f64) -> Result<PathBuf> {
        actions::trim(self.engine.as_ref(), &self.config, path.as_ref(), start, duration).await
    }

    pub async fn compress(&self, path: impl AsRef<Path>, height: u32) -> Result<PathBuf> {
        actions::compress(self.engine.as_ref(), &self.config, path.as_ref(), height).await
    }

    pub async fn reverse(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        actions::reverse(self.engine.as_ref(), &self.config, path.as_ref()).await
    }

    /// Concatenate `paths` into `output` at the configured merge size.
    pub async fn merge(&self, paths: &[PathBuf], output: impl AsRef<Path>) -> Result<PathBuf> {
        self.merge_with_size(paths, output, MergeSize::from(self.config.merge))
            .await
    }

    /// Concatenate `paths` into `output`, scaling every input to `size`.
    pub async fn merge_with_size(
        &self,
        paths: &[PathBuf],
        output: impl AsRef<Path>,
        size: MergeSize,
    ) -> Result<PathBuf> {
        actions::merge(self.engine.as_ref(), paths, output.as_ref(), size).await
    }

    pub async fn boomerang(&self, path: impl AsRef<Path>, reorder: bool) -> Result<PathBuf> {
        actions::boomerang(self.engine.as_ref(), &self.config, path.as_ref(), reorder).await
    }

    /// Change playback speed; `2.0` plays twice as fast.
    pub async fn set_speed(&self, path: impl AsRef<Path>, speed: f64) -> Result<PathBuf> {
        actions::set_speed(self.engine.as_ref(), &self.config, path.as_ref(), speed).await
    }
}

impl std::fmt::Debug for VideoManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

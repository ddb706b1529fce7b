//! Configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! sub-configs for tool discovery, encoding, output naming, merging, and the
//! composite operations. Every section defaults sensibly so a completely empty
//! `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub encoding: EncodingConfig,
    pub output: OutputConfig,
    pub merge: MergeConfig,
    pub boomerang: BoomerangConfig,
    pub speed: SpeedConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    ///
    /// String-based so the caller can read the file however it sees fit.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.tools.timeout_secs == Some(0) {
            warnings.push("tools.timeout_secs is 0; every command will time out".into());
        }

        for (name, value) in [
            ("encoding.video_codec", &self.encoding.video_codec),
            ("encoding.preset", &self.encoding.preset),
            ("encoding.pixel_format", &self.encoding.pixel_format),
        ] {
            if value.trim().is_empty() {
                warnings.push(format!("{name} is empty"));
            }
        }

        for (name, ext) in [
            ("output.video_extension", &self.output.video_extension),
            ("output.image_extension", &self.output.image_extension),
        ] {
            if ext.is_empty() {
                warnings.push(format!("{name} is empty"));
            } else if ext.starts_with('.') {
                warnings.push(format!(
                    "{name} '{ext}' starts with '.'; outputs will contain a double dot"
                ));
            }
        }

        if self.merge.width == 0 || self.merge.height == 0 {
            warnings.push(format!(
                "merge size {}x{} has a zero dimension",
                self.merge.width, self.merge.height
            ));
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Paths and limits for the external CLI tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    /// Maximum run time per tool invocation. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl ToolsConfig {
    /// The configured timeout as a [`Duration`].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Re-encode settings shared by trim and compress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub video_codec: String,
    pub preset: String,
    pub pixel_format: String,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            video_codec: "libx264".into(),
            preset: "ultrafast".into(),
            pixel_format: "yuv420p".into(),
        }
    }
}

/// How the extension is located when deriving output paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionStrategy {
    /// Strip from the last `.` of the file name (`a.b.mov` -> `a.b`).
    #[default]
    LastSeparator,
    /// Strip from the first `.` of the file name (`a.b.mov` -> `a`).
    FirstSeparator,
}

/// Output naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Extension for video outputs, without the dot.
    pub video_extension: String,
    /// Extension for extracted images, without the dot.
    pub image_extension: String,
    pub extension_strategy: ExtensionStrategy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            video_extension: "mp4".into(),
            image_extension: "jpg".into(),
            extension_strategy: ExtensionStrategy::default(),
        }
    }
}

/// Default frame size every merge input is scaled to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Boomerang settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoomerangConfig {
    /// Keep the reversed intermediate file after merging.
    pub retain_intermediates: bool,
}

/// Speed-change settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Also retime the audio track with `atempo`. Off by default, which keeps
    /// audio at its original pace.
    pub adjust_audio: bool,
}

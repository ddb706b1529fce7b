//! Media-domain types: the probe result record and stream kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// StreamKind
// ---------------------------------------------------------------------------

/// Elementary stream type, as reported in ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    Data,
}

impl StreamKind {
    /// The `codec_type` string ffprobe uses for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Subtitle => "subtitle",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "subtitle" => Ok(Self::Subtitle),
            "data" => Ok(Self::Data),
            other => Err(format!("unknown stream kind: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// MediaInfo
// ---------------------------------------------------------------------------

/// Container and stream metadata for one media file.
///
/// Built fresh from a single probe call. Container-level values come from
/// ffprobe's `format` section; stream-level values come from the selected
/// stream (the first video stream unless another kind was requested).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Duration in seconds.
    pub duration: f64,
    /// Creation timestamp exactly as the container reports it.
    pub creation_time: String,
    /// File size in bytes.
    pub size: u64,
    /// Overall bit rate in bits per second, when the container reports one.
    pub bit_rate: Option<u64>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Average frame rate as a fraction, e.g. `"30000/1001"`.
    pub frame_rate: String,
    /// Codec name of the selected stream (e.g. `"h264"`).
    pub codec_name: String,
    /// Codec type of the selected stream.
    pub codec_type: StreamKind,
    /// Sample aspect ratio, e.g. `"1:1"`. Absent when ffprobe does not know it.
    pub sample_aspect_ratio: Option<String>,
    /// Index of the selected stream within the container.
    pub stream_index: u32,
    /// Whether the container carries at least one audio stream.
    pub has_audio: bool,
}

impl MediaInfo {
    /// Average frame rate as frames per second, if the fraction is usable.
    pub fn fps(&self) -> Option<f64> {
        let (num, den) = self.frame_rate.split_once('/')?;
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den == 0.0 {
            return None;
        }
        Some(num / den)
    }

    /// Whether the frame is taller than it is wide.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

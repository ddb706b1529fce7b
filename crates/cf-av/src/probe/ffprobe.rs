//! FFprobe-based metadata extraction.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format -show_streams`
//! and maps the JSON output into [`cf_core::MediaInfo`], selecting the first
//! stream of the requested kind.

use std::path::Path;

use cf_core::{MediaInfo, ProbeError, StreamKind};
use serde::Deserialize;

use crate::engine::{Engine, Tool};
use crate::paths::utf8_path;

/// A prober that runs ffprobe through an [`Engine`].
#[derive(Clone, Copy)]
pub struct FfprobeProber<'a> {
    engine: &'a dyn Engine,
}

impl<'a> FfprobeProber<'a> {
    /// Create a new prober over the given engine.
    pub fn new(engine: &'a dyn Engine) -> Self {
        Self { engine }
    }

    /// Probe `path`, describing its first video stream.
    pub async fn probe(&self, path: &Path) -> cf_core::Result<MediaInfo> {
        self.probe_stream(path, StreamKind::Video).await
    }

    /// Probe `path`, describing its first stream of `kind`.
    pub async fn probe_stream(&self, path: &Path, kind: StreamKind) -> cf_core::Result<MediaInfo> {
        utf8_path(path)?;
        tracing::info!("probe {:?} ({kind} stream)", path);

        let output = self.engine.run(Tool::Ffprobe, probe_args(path)).await?;
        parse_ffprobe_output(&output.stdout, kind)
    }
}

fn probe_args(path: &Path) -> Vec<String> {
    let mut args: Vec<String> = [
        "-v",
        "quiet",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    args.push(path.to_string_lossy().into_owned());
    args
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    creation_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: Option<u32>,
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    sample_aspect_ratio: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Map raw ffprobe JSON into a [`MediaInfo`] for the first stream of `kind`.
///
/// Dimensions and frame rate are required for video streams; for other kinds
/// they default to `0` and an empty string. ffprobe omits `bit_rate` and
/// `sample_aspect_ratio` when it cannot determine them, so both are optional.
///
/// # Errors
///
/// - [`ProbeError::InvalidJson`] if `json` is not an ffprobe dump.
/// - [`ProbeError::NoStream`] if no stream of `kind` exists.
/// - [`ProbeError::MissingField`] / [`ProbeError::InvalidField`] if a
///   required value is absent or unparsable.
pub fn parse_ffprobe_output(json: &str, kind: StreamKind) -> cf_core::Result<MediaInfo> {
    let output: FfprobeOutput =
        serde_json::from_str(json).map_err(|e| ProbeError::InvalidJson(e.to_string()))?;

    let format = output
        .format
        .ok_or_else(|| ProbeError::MissingField("format".into()))?;

    let duration = parse_field::<f64>("format.duration", format.duration)?;
    let size = parse_field::<u64>("format.size", format.size)?;
    let bit_rate = parse_optional::<u64>("format.bit_rate", format.bit_rate)?;
    let creation_time = require("format.tags.creation_time", format.tags.creation_time)?;

    let has_audio = output
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    let (position, stream) = output
        .streams
        .into_iter()
        .enumerate()
        .find(|(_, s)| s.codec_type.as_deref() == Some(kind.as_str()))
        .ok_or_else(|| ProbeError::NoStream {
            codec_type: kind.to_string(),
        })?;

    let stream_index = stream.index.unwrap_or(position as u32);
    let field = |name: &str| format!("streams[{stream_index}].{name}");

    let codec_name = require(&field("codec_name"), stream.codec_name)?;

    let (width, height, frame_rate) = if kind == StreamKind::Video {
        (
            require(&field("width"), stream.width)?,
            require(&field("height"), stream.height)?,
            require(&field("avg_frame_rate"), stream.avg_frame_rate)?,
        )
    } else {
        (
            stream.width.unwrap_or(0),
            stream.height.unwrap_or(0),
            stream.avg_frame_rate.unwrap_or_default(),
        )
    };

    Ok(MediaInfo {
        duration,
        creation_time,
        size,
        bit_rate,
        width,
        height,
        frame_rate,
        codec_name,
        codec_type: kind,
        sample_aspect_ratio: stream.sample_aspect_ratio,
        stream_index,
        has_audio,
    })
}

fn require<T>(field: &str, value: Option<T>) -> Result<T, ProbeError> {
    value.ok_or_else(|| ProbeError::MissingField(field.to_string()))
}

fn parse_field<T: std::str::FromStr>(field: &str, value: Option<String>) -> Result<T, ProbeError> {
    let raw = require(field, value)?;
    raw.trim().parse().map_err(|_| ProbeError::InvalidField {
        field: field.to_string(),
        value: raw,
    })
}

/// Like [`parse_field`], but absent and `N/A` values become `None`.
fn parse_optional<T: std::str::FromStr>(
    field: &str,
    value: Option<String>,
) -> Result<Option<T>, ProbeError> {
    match value {
        Some(raw) if raw.trim() != "N/A" => parse_field(field, Some(raw)).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::Error;

    /// Phone recording: a data stream first, then video, then audio.
    const PHONE_CLIP: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "data", "codec_name": "none"},
            {
                "index": 1,
                "codec_type": "video",
                "codec_name": "h264",
                "width": 1080,
                "height": 1920,
                "avg_frame_rate": "30000/1001",
                "sample_aspect_ratio": "1:1"
            },
            {"index": 2, "codec_type": "audio", "codec_name": "aac", "avg_frame_rate": "0/0"}
        ],
        "format": {
            "filename": "clip.mov",
            "duration": "12.512000",
            "size": "15728640",
            "bit_rate": "10056789",
            "tags": {"creation_time": "2024-05-01T10:00:00.000000Z"}
        }
    }"#;

    fn parse(json: &str) -> cf_core::Result<MediaInfo> {
        parse_ffprobe_output(json, StreamKind::Video)
    }

    #[test]
    fn probe_arguments() {
        assert_eq!(
            probe_args(Path::new("/videos/clip.mov")),
            [
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "/videos/clip.mov"
            ]
        );
    }

    #[test]
    fn selects_first_video_stream() {
        let info = parse(PHONE_CLIP).unwrap();
        assert_eq!(info.stream_index, 1);
        assert_eq!(info.codec_name, "h264");
        assert_eq!(info.codec_type, StreamKind::Video);
        assert_eq!((info.width, info.height), (1080, 1920));
        assert_eq!(info.frame_rate, "30000/1001");
        assert_eq!(info.sample_aspect_ratio.as_deref(), Some("1:1"));
        assert!(info.has_audio);
    }

    #[test]
    fn container_fields() {
        let info = parse(PHONE_CLIP).unwrap();
        assert!((info.duration - 12.512).abs() < f64::EPSILON);
        assert_eq!(info.size, 15_728_640);
        assert_eq!(info.bit_rate, Some(10_056_789));
        assert_eq!(info.creation_time, "2024-05-01T10:00:00.000000Z");
    }

    #[test]
    fn video_at_index_zero_is_selected() {
        let json = r#"{
            "streams": [
                {"index": 0, "codec_type": "video", "codec_name": "hevc", "width": 3840,
                 "height": 2160, "avg_frame_rate": "60/1", "sample_aspect_ratio": "1:1"},
                {"index": 1, "codec_type": "audio", "codec_name": "aac"}
            ],
            "format": {"duration": "5.0", "size": "900", "bit_rate": "1440",
                       "tags": {"creation_time": "2023-07-14T08:30:00Z"}}
        }"#;
        let info = parse(json).unwrap();
        assert_eq!(info.stream_index, 0);
        assert_eq!(info.codec_name, "hevc");
        assert_eq!(info.frame_rate, "60/1");
    }

    #[test]
    fn selects_audio_stream_on_request() {
        let info = parse_ffprobe_output(PHONE_CLIP, StreamKind::Audio).unwrap();
        assert_eq!(info.stream_index, 2);
        assert_eq!(info.codec_name, "aac");
        assert_eq!(info.width, 0);
        assert_eq!(info.frame_rate, "0/0");
        assert_eq!(info.sample_aspect_ratio, None);
    }

    #[test]
    fn stream_index_falls_back_to_position() {
        let json = r#"{
            "streams": [{"codec_type": "audio", "codec_name": "aac"}],
            "format": {"duration": "1", "size": "1", "bit_rate": "1",
                       "tags": {"creation_time": "t"}}
        }"#;
        let info = parse_ffprobe_output(json, StreamKind::Audio).unwrap();
        assert_eq!(info.stream_index, 0);
        assert!(info.has_audio);
    }

    #[test]
    fn invalid_json() {
        let err = parse("not json at all").unwrap_err();
        assert!(matches!(err, Error::Probe(ProbeError::InvalidJson(_))));
    }

    #[test]
    fn empty_object_is_missing_format() {
        let err = parse("{}").unwrap_err();
        assert!(
            matches!(err, Error::Probe(ProbeError::MissingField(ref f)) if f == "format")
        );
    }

    #[test]
    fn audio_only_file_has_no_video_stream() {
        let json = r#"{
            "streams": [{"index": 0, "codec_type": "audio", "codec_name": "mp3"}],
            "format": {"duration": "180.0", "size": "4000000", "bit_rate": "177777",
                       "tags": {"creation_time": "2020-01-01T00:00:00Z"}}
        }"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(
            err,
            Error::Probe(ProbeError::NoStream { ref codec_type }) if codec_type == "video"
        ));
    }

    #[test]
    fn missing_creation_time() {
        let json = PHONE_CLIP.replace(
            r#""tags": {"creation_time": "2024-05-01T10:00:00.000000Z"}"#,
            r#""tags": {"encoder": "Lavf60.3.100"}"#,
        );
        let err = parse(&json).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Probe error: missing field `format.tags.creation_time`"
        );
    }

    #[test]
    fn missing_video_dimension_names_stream() {
        let json = PHONE_CLIP.replace(r#""height": 1920,"#, "");
        let err = parse(&json).unwrap_err();
        assert!(
            matches!(err, Error::Probe(ProbeError::MissingField(ref f)) if f == "streams[1].height")
        );
    }

    #[test]
    fn unknown_sample_aspect_ratio_is_omitted() {
        let json = r#"{
            "streams": [{"index": 0, "codec_type": "video", "codec_name": "mjpeg",
                         "width": 640, "height": 480, "avg_frame_rate": "15/1"}],
            "format": {"duration": "2.0", "size": "300000", "bit_rate": "1200000",
                       "tags": {"creation_time": "2019-03-02T09:00:00Z"}}
        }"#;
        let info = parse(json).unwrap();
        assert_eq!(info.sample_aspect_ratio, None);
        assert_eq!((info.width, info.height), (640, 480));
    }

    #[test]
    fn container_without_bit_rate() {
        let json = PHONE_CLIP.replace(r#""bit_rate": "10056789","#, "");
        let info = parse(&json).unwrap();
        assert_eq!(info.bit_rate, None);
        assert_eq!(info.size, 15_728_640);
    }

    #[test]
    fn bit_rate_not_available() {
        let json = PHONE_CLIP.replace(r#""bit_rate": "10056789""#, r#""bit_rate": "N/A""#);
        assert_eq!(parse(&json).unwrap().bit_rate, None);
    }

    #[test]
    fn unparsable_bit_rate() {
        let json = PHONE_CLIP.replace(r#""bit_rate": "10056789""#, r#""bit_rate": "fast""#);
        let err = parse(&json).unwrap_err();
        assert!(matches!(
            err,
            Error::Probe(ProbeError::InvalidField { ref field, ref value })
                if field == "format.bit_rate" && value == "fast"
        ));
    }
}

//! Probe integration tests
//!
//! ffprobe output is supplied by a recording engine, so these run without
//! ffmpeg installed.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;

use clipforge::{Error, ProbeError, StreamKind, Tool};
use common::{manager, FakeEngine};

#[tokio::test]
async fn probe_describes_first_video_stream() {
    let engine = Arc::new(FakeEngine::new());
    let info = manager(&engine).probe("clip.mov").await.unwrap();

    assert_eq!(info.stream_index, 1);
    assert_eq!(info.codec_type, StreamKind::Video);
    assert_eq!(info.codec_name, "h264");
    assert_eq!((info.width, info.height), (1080, 1920));
    assert!(info.is_portrait());
    assert_eq!(info.fps(), Some(30.0));
    assert!((info.duration - 8.0).abs() < f64::EPSILON);
    assert_eq!(info.creation_time, "2024-05-01T10:00:00.000000Z");
    assert!(info.has_audio);

    let calls = engine.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Tool::Ffprobe);
    assert_eq!(
        calls[0].1,
        [
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            "clip.mov"
        ]
    );
}

#[tokio::test]
async fn probe_stream_selects_audio() {
    let engine = Arc::new(FakeEngine::new());
    let info = manager(&engine)
        .probe_stream("clip.mov", StreamKind::Audio)
        .await
        .unwrap();

    assert_eq!(info.stream_index, 2);
    assert_eq!(info.codec_name, "aac");
    assert_eq!(info.codec_type, StreamKind::Audio);
}

#[tokio::test]
async fn audio_only_file_has_no_video_stream() {
    let engine = Arc::new(FakeEngine {
        probe_stdout: r#"{
            "streams": [{"index": 0, "codec_type": "audio", "codec_name": "mp3"}],
            "format": {"duration": "180.0", "size": "4000000", "bit_rate": "177777",
                       "tags": {"creation_time": "2020-01-01T00:00:00Z"}}
        }"#
        .into(),
        ..Default::default()
    });
    let err = manager(&engine).probe("song.mp3").await.unwrap_err();
    assert_matches!(err, Error::Probe(ProbeError::NoStream { ref codec_type }) if codec_type == "video");
}

#[tokio::test]
async fn missing_creation_time_is_reported() {
    let engine = Arc::new(FakeEngine {
        probe_stdout: r#"{
            "streams": [{"index": 0, "codec_type": "video", "codec_name": "h264",
                         "width": 640, "height": 480, "avg_frame_rate": "25/1",
                         "sample_aspect_ratio": "1:1"}],
            "format": {"duration": "1.0", "size": "100", "bit_rate": "800"}
        }"#
        .into(),
        ..Default::default()
    });
    let err = manager(&engine).probe("clip.mp4").await.unwrap_err();
    assert_matches!(err, Error::Probe(ProbeError::MissingField(ref field)) if field == "format.tags.creation_time");
}

#[tokio::test]
async fn garbage_output_is_invalid_json() {
    let engine = Arc::new(FakeEngine {
        probe_stdout: "clip.mov: No such file or directory".into(),
        ..Default::default()
    });
    let err = manager(&engine).probe("clip.mov").await.unwrap_err();
    assert_matches!(err, Error::Probe(ProbeError::InvalidJson(_)));
}

#[tokio::test]
async fn optional_container_and_stream_fields() {
    let engine = Arc::new(FakeEngine {
        probe_stdout: r#"{
            "streams": [{"index": 0, "codec_type": "video", "codec_name": "vp9",
                         "width": 1280, "height": 720, "avg_frame_rate": "30/1"}],
            "format": {"duration": "4.2", "size": "2100000",
                       "tags": {"creation_time": "2022-02-02T02:02:02Z"}}
        }"#
        .into(),
        ..Default::default()
    });
    let info = manager(&engine).probe("screen.webm").await.unwrap();
    assert_eq!(info.bit_rate, None);
    assert_eq!(info.sample_aspect_ratio, None);
    assert_eq!(info.codec_name, "vp9");
}

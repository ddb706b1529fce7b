//! Shared test harness for integration tests.
//!
//! Provides [`FakeEngine`], an [`Engine`] that records every invocation and
//! answers ffprobe with canned JSON, and [`manager`] which wires it into a
//! [`VideoManager`].

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use clipforge::{Config, Engine, Error, Result, Tool, ToolOutput, VideoManager};

/// ffprobe output for a portrait phone recording with a leading data track.
pub const PHONE_CLIP_JSON: &str = r#"{
    "streams": [
        {"index": 0, "codec_type": "data", "codec_name": "none"},
        {
            "index": 1,
            "codec_type": "video",
            "codec_name": "h264",
            "width": 1080,
            "height": 1920,
            "avg_frame_rate": "30/1",
            "sample_aspect_ratio": "1:1"
        },
        {"index": 2, "codec_type": "audio", "codec_name": "aac"}
    ],
    "format": {
        "filename": "clip.mov",
        "duration": "8.000000",
        "size": "4194304",
        "bit_rate": "4194304",
        "tags": {"creation_time": "2024-05-01T10:00:00.000000Z"}
    }
}"#;

/// Recording engine double.
#[derive(Default)]
pub struct FakeEngine {
    pub calls: Mutex<Vec<(Tool, Vec<String>)>>,
    /// Stdout returned for every ffprobe call.
    pub probe_stdout: String,
    /// Fail any call whose last argument equals this.
    pub fail_on_output: Option<String>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            probe_stdout: PHONE_CLIP_JSON.to_string(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(Tool, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Arguments of the only recorded call.
    pub fn single_call(&self) -> Vec<String> {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one engine call: {calls:?}");
        calls.into_iter().next().unwrap().1
    }
}

#[async_trait]
impl Engine for FakeEngine {
    async fn run(&self, tool: Tool, args: Vec<String>) -> Result<ToolOutput> {
        let failing = self
            .fail_on_output
            .as_deref()
            .is_some_and(|out| args.last().map(String::as_str) == Some(out));
        self.calls.lock().unwrap().push((tool, args));

        if failing {
            return Err(Error::tool(
                tool.name(),
                "exited with status 1: Conversion failed!",
            ));
        }

        let stdout = match tool {
            Tool::Ffprobe => self.probe_stdout.clone(),
            Tool::Ffmpeg => String::new(),
        };
        Ok(ToolOutput {
            stdout,
            ..Default::default()
        })
    }
}

/// A manager over `engine` with the default configuration.
pub fn manager(engine: &Arc<FakeEngine>) -> VideoManager {
    manager_with_config(engine, Config::default())
}

pub fn manager_with_config(engine: &Arc<FakeEngine>, config: Config) -> VideoManager {
    VideoManager::with_engine(engine.clone(), config)
}

/// Value following `flag` in `args`.
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Every value following a `-i` flag, in order.
pub fn inputs(args: &[String]) -> Vec<&str> {
    args.windows(2)
        .filter(|w| w[0] == "-i")
        .map(|w| w[1].as_str())
        .collect()
}

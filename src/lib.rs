//! # clipforge
//!
//! Async wrappers around ffmpeg and ffprobe for everyday clip edits.
//!
//! [`VideoManager`] exposes one method per operation. Each derives its output
//! path from the input (`clip.mov` -> `clip_trim.mp4`), runs the engine once,
//! checks that it succeeded, and returns the path. Probing returns a
//! [`MediaInfo`] instead.
//!
//! | Operation | Output |
//! |---|---|
//! | [`probe`](VideoManager::probe) | [`MediaInfo`] of the first video stream |
//! | [`thumbnail`](VideoManager::thumbnail) | `<stem>_thumb_1.jpg` |
//! | [`extract_frames`](VideoManager::extract_frames) | prefix `<stem>_thumb_` |
//! | [`trim`](VideoManager::trim) | `<stem>_trim.mp4` |
//! | [`compress`](VideoManager::compress) | `<stem>_compress.mp4` |
//! | [`reverse`](VideoManager::reverse) | `<stem>_reverse.mp4` |
//! | [`merge`](VideoManager::merge) | caller-chosen path |
//! | [`boomerang`](VideoManager::boomerang) | `<stem>_boomerang.mp4` |
//! | [`set_speed`](VideoManager::set_speed) | `<stem>_slow.mp4` |

pub mod logging;
mod manager;

pub use manager::VideoManager;

pub use cf_av::{Engine, MergeSize, ProcessEngine, Tool, ToolInfo, ToolOutput};
pub use cf_core::config::{self, Config, ExtensionStrategy};
pub use cf_core::{Error, MediaInfo, ProbeError, Result, StreamKind};

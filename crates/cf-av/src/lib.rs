//! # cf-av
//!
//! External tool plumbing and media operations for clipforge.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to ffmpeg
//!   and ffprobe.
//! - **Command execution** ([`ToolCommand`]) -- async builder with optional
//!   timeout for running external processes.
//! - **Engine seam** ([`Engine`], [`ProcessEngine`]) -- the one place where an
//!   operation's argument vector turns into a process.
//! - **Probing** ([`probe::FfprobeProber`]) -- ffprobe JSON mapped into
//!   [`cf_core::MediaInfo`].
//! - **Path derivation** ([`paths`]) -- output names built from input names.
//! - **Operations** ([`actions`]) -- thumbnail, frame extraction, trim,
//!   compress, reverse, merge, boomerang, and speed change.

pub mod actions;
pub mod command;
pub mod engine;
pub mod paths;
pub mod probe;
pub mod tools;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use engine::{Engine, ProcessEngine, Tool};
pub use probe::FfprobeProber;
pub use tools::{ToolInfo, ToolRegistry};

// Operation functions
pub use actions::{
    boomerang, compress, extract_frames, merge, reverse, set_speed, thumbnail, trim, MergeSize,
};

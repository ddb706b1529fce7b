//! Media probing backed by the `ffprobe` CLI.
//!
//! [`FfprobeProber`] runs ffprobe through an [`crate::Engine`] and maps its
//! JSON dump into [`cf_core::MediaInfo`]. The parsing half is exposed as
//! [`parse_ffprobe_output`] so canned output can be inspected without a
//! process.

pub mod ffprobe;

pub use self::ffprobe::{parse_ffprobe_output, FfprobeProber};

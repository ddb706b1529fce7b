//! ffmpeg/ffprobe discovery.
//!
//! A [`ToolRegistry`] maps each [`Tool`] to the executable that will be
//! spawned for it. Paths come from [`ToolsConfig`] when they exist on disk,
//! otherwise from a `PATH` search.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use cf_core::config::ToolsConfig;
use serde::{Deserialize, Serialize};

/// The external tools an engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// The transcoder.
    Ffmpeg,
    /// The metadata probe.
    Ffprobe,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::Ffmpeg, Tool::Ffprobe];

    /// Executable name searched for in `PATH`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ffmpeg => "ffmpeg",
            Self::Ffprobe => "ffprobe",
        }
    }

    fn configured_path(self, config: &ToolsConfig) -> Option<&Path> {
        match self {
            Self::Ffmpeg => config.ffmpeg_path.as_deref(),
            Self::Ffprobe => config.ffprobe_path.as_deref(),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Availability report for one tool, returned by [`ToolRegistry::check_all`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    /// First line of `-version` output.
    pub version: Option<String>,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    paths: HashMap<Tool, PathBuf>,
}

impl ToolRegistry {
    /// Resolve every [`Tool`]. A configured path is used when it exists;
    /// a configured path that does not exist is reported and `PATH` is
    /// searched instead. Tools that cannot be found are left out.
    pub fn discover(config: &ToolsConfig) -> Self {
        let mut paths = HashMap::new();

        for tool in Tool::ALL {
            let resolved = match tool.configured_path(config) {
                Some(p) if p.exists() => Some(p.to_path_buf()),
                Some(p) => {
                    tracing::warn!(
                        "configured {tool} path {} does not exist; searching PATH",
                        p.display()
                    );
                    which::which(tool.name()).ok()
                }
                None => which::which(tool.name()).ok(),
            };

            match resolved {
                Some(path) => {
                    tracing::debug!("found {tool} at {}", path.display());
                    paths.insert(tool, path);
                }
                None => tracing::debug!("{tool} not found"),
            }
        }

        Self { paths }
    }

    /// Use `path` for `tool` without any lookup.
    pub fn with_tool(mut self, tool: Tool, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(tool, path.into());
        self
    }

    pub fn path(&self, tool: Tool) -> Option<&Path> {
        self.paths.get(&tool).map(PathBuf::as_path)
    }

    /// The executable for `tool`, or [`cf_core::Error::Tool`] when it was
    /// not found.
    pub fn require(&self, tool: Tool) -> cf_core::Result<&Path> {
        self.path(tool).ok_or_else(|| {
            cf_core::Error::tool(
                tool.name(),
                format!("{tool} not found; is it installed and in PATH?"),
            )
        })
    }

    /// Probe each tool's version, in [`Tool::ALL`] order.
    pub fn check_all(&self) -> Vec<ToolInfo> {
        Tool::ALL
            .iter()
            .map(|&tool| {
                let path = self.path(tool);
                ToolInfo {
                    name: tool.name().to_string(),
                    available: path.is_some(),
                    version: path.and_then(detect_version),
                    path: path.map(Path::to_path_buf),
                }
            })
            .collect()
    }
}

fn detect_version(path: &Path) -> Option<String> {
    let output = std::process::Command::new(path)
        .arg("-version")
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
}

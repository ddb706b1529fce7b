//! The [`Engine`] trait: the single seam between media operations and the
//! processes that do the actual work.
//!
//! Operations only build argument vectors and hand them to an engine. The
//! production implementation, [`ProcessEngine`], spawns the discovered tool
//! through [`ToolCommand`]; tests substitute a recorder.

use std::time::Duration;

use async_trait::async_trait;

use crate::command::{ToolCommand, ToolOutput};
pub use crate::tools::Tool;
use crate::tools::ToolRegistry;

/// Runs one external tool invocation to completion.
///
/// Implementations must fail with [`cf_core::Error::Tool`] when the tool does
/// not exit successfully, so callers never hand out paths to files that were
/// not produced.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Run `tool` with `args` and return its captured output.
    async fn run(&self, tool: Tool, args: Vec<String>) -> cf_core::Result<ToolOutput>;
}

/// An [`Engine`] that spawns real processes.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    tools: ToolRegistry,
    timeout: Option<Duration>,
}

impl ProcessEngine {
    /// Create an engine over an already-populated registry.
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools,
            timeout: None,
        }
    }

    /// Discover tools and apply the configured timeout.
    pub fn discover(tools_config: &cf_core::config::ToolsConfig) -> Self {
        Self {
            tools: ToolRegistry::discover(tools_config),
            timeout: tools_config.timeout(),
        }
    }

    /// Limit every invocation to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The registry this engine resolves executables from.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }
}

#[async_trait]
impl Engine for ProcessEngine {
    async fn run(&self, tool: Tool, args: Vec<String>) -> cf_core::Result<ToolOutput> {
        let program = self.tools.require(tool)?;

        let mut cmd = ToolCommand::new(program);
        cmd.label(tool.name()).args(args);
        if let Some(limit) = self.timeout {
            cmd.timeout(limit);
        }

        cmd.execute().await
    }
}

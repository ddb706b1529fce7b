//! Async process runner used by [`crate::ProcessEngine`].

use std::path::PathBuf;
use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

/// What a finished tool wrote, along with its exit status.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub status: ExitStatus,
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
}

/// One invocation of an external executable.
///
/// Every argument reaches the process as-is, so a path with spaces is one
/// argument and never needs quoting. The child's stdin is `/dev/null`: an
/// interactive prompt such as ffmpeg's "Overwrite? [y/N]" reads EOF and the
/// tool exits instead of waiting forever.
///
/// # Example
///
/// ```no_run
/// use cf_av::ToolCommand;
///
/// # async fn example() -> cf_core::Result<()> {
/// let output = ToolCommand::new("/usr/bin/ffprobe")
///     .label("ffprobe")
///     .args(["-v", "quiet", "-print_format", "json", "-show_format"])
///     .arg("/videos/clip.mov")
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    label: Option<String>,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            label: None,
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Name used for this command in logs and errors. Defaults to the
    /// executable's file name.
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(&mut self, args: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Kill the process if it runs longer than `limit`.
    pub fn timeout(&mut self, limit: Duration) -> &mut Self {
        self.timeout = Some(limit);
        self
    }

    fn name(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Run to completion and capture both output streams.
    ///
    /// # Errors
    ///
    /// [`cf_core::Error::Tool`] when the process cannot be spawned, outlives
    /// the timeout, or exits unsuccessfully. In the last case the message
    /// carries the trimmed stderr.
    pub async fn execute(&self) -> cf_core::Result<ToolOutput> {
        let name = self.name();

        tracing::debug!("exec: {} {}", self.program.display(), self.args.join(" "));

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| cf_core::Error::tool(&name, format!("failed to spawn: {e}")))?;

        let waited = match self.timeout {
            // Dropping the timed-out future drops the child, which kills it.
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| cf_core::Error::tool(&name, format!("timed out after {limit:?}")))?,
            None => child.wait_with_output().await,
        };
        let output = waited
            .map_err(|e| cf_core::Error::tool(&name, format!("failed waiting for exit: {e}")))?;

        into_result(&name, output)
    }
}

fn into_result(name: &str, output: Output) -> cf_core::Result<ToolOutput> {
    let captured = ToolOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if captured.status.success() {
        return Ok(captured);
    }

    tracing::warn!("{name} exited with status {}", captured.status);
    Err(cf_core::Error::tool(
        name,
        format!(
            "exited with status {}: {}",
            captured.status,
            captured.stderr.trim()
        ),
    ))
}

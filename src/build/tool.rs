//! External tool invocation.
//!
//! Tools are run directly from an argument vector (never through a shell),
//! with an explicit working directory, and block until they exit. Their
//! stdio is inherited so the tool's own diagnostics reach the user.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error("'{program}' was not found; is it installed and on PATH?")]
    NotFound { program: String },

    #[error("failed to start '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("'{invocation}' failed with {status}")]
    Failed {
        invocation: String,
        status: ExitStatus,
    },
}

impl ToolError {
    /// Exit code to hand back to our own caller: the tool's code when it
    /// exited normally, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::Failed { status, .. } => status.code().filter(|c| *c != 0).unwrap_or(1),
            ToolError::NotFound { .. } | ToolError::Spawn { .. } => 1,
        }
    }
}

/// A single external command, built up before it is run.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: String,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the tool in `dir` instead of the current process directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    #[cfg(test)]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[cfg(test)]
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Run to completion. A non-zero exit is an error.
    pub fn run(&self) -> Result<(), ToolError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        tracing::debug!(command = %self, cwd = ?self.current_dir, "running");

        let status = command.status().map_err(|e| self.spawn_error(e))?;
        if !status.success() {
            return Err(ToolError::Failed {
                invocation: self.to_string(),
                status,
            });
        }
        Ok(())
    }

    fn spawn_error(&self, source: io::Error) -> ToolError {
        if source.kind() == io::ErrorKind::NotFound {
            ToolError::NotFound {
                program: self.program.clone(),
            }
        } else {
            ToolError::Spawn {
                program: self.program.clone(),
                source,
            }
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_arguments() {
        let invocation = Invocation::new("pandoc").args(["-s", "-f", "markdown"]).arg("a.md");
        assert_eq!(invocation.to_string(), "pandoc -s -f markdown a.md");
    }

    #[test]
    fn test_success() {
        assert!(Invocation::new("true").run().is_ok());
    }

    #[test]
    fn test_non_zero_exit_keeps_code() {
        let err = Invocation::new("sh").args(["-c", "exit 3"]).run().unwrap_err();
        assert!(matches!(err, ToolError::Failed { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_missing_program() {
        let err = Invocation::new("compendium-no-such-tool").run().unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_runs_in_given_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        Invocation::new("sh")
            .args(["-c", "echo here > marker"])
            .current_dir(dir.path())
            .run()
            .unwrap();
        assert!(dir.path().join("marker").exists());
    }

    #[test]
    fn test_arguments_are_not_shell_interpreted() {
        let dir = tempfile::TempDir::new().unwrap();
        Invocation::new("touch")
            .arg("a b; touch injected")
            .current_dir(dir.path())
            .run()
            .unwrap();
        assert!(dir.path().join("a b; touch injected").exists());
        assert!(!dir.path().join("injected").exists());
    }
}

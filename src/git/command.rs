use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use crate::config::InspectorConfig;
use crate::errors::{map_command_output_error, AppError, AppResult, GitError};
use crate::types::CommandOutput;

/// A single read-only git invocation against a repository.
///
/// The child runs with its working directory set to the repository, no
/// pager, no optional locks (so `git status` never rewrites the index) and
/// the C locale.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: PathBuf,
    cwd: PathBuf,
    args: Vec<String>,
}

impl GitCommand {
    pub fn new(config: &InspectorConfig, cwd: &Path) -> Self {
        Self {
            program: config.git_binary.clone(),
            cwd: cwd.to_path_buf(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Command line as it would be typed, used in logs and errors
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&self.cwd)
            .args(&self.args)
            .env("GIT_PAGER", "cat")
            .env("GIT_OPTIONAL_LOCKS", "0")
            .env("LC_ALL", "C")
            .stdin(Stdio::null());
        cmd
    }

    /// Run with both output streams sent to the null device and report
    /// whether the command exited zero. Spawn failures count as `false`.
    pub fn probe(&self) -> bool {
        let cmd_str = self.command_line();
        tracing::debug!(cwd = %self.cwd.display(), "Probing: {}", cmd_str);

        match self
            .build()
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::debug!("Probe '{}' could not be spawned: {}", cmd_str, e);
                false
            }
        }
    }

    /// Run and capture stdout and stderr, each capped at `limit` bytes.
    ///
    /// A non-zero exit is not an error here; see [`GitCommand::run`].
    /// Exceeding the cap on either stream yields `GitError::OutputTooLarge`.
    pub fn capture(&self, limit: usize) -> AppResult<CommandOutput> {
        let cmd_str = self.command_line();
        tracing::debug!(cwd = %self.cwd.display(), "Capturing output: {}", cmd_str);

        let mut child = self
            .build()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Spawn {
                command: cmd_str.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| missing_pipe(&cmd_str, "stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| missing_pipe(&cmd_str, "stderr"))?;

        // stderr is drained on its own thread so a chatty child can never
        // block on a full pipe while stdout is being read.
        let stderr_reader = thread::spawn(move || read_capped(stderr, limit, true));

        let stdout_result = read_capped(stdout, limit, false);
        if matches!(stdout_result, Ok((_, true))) {
            // Nothing more is needed from this process.
            let _ = child.kill();
        }

        let stderr_result = stderr_reader
            .join()
            .map_err(|_| AppError::Task(format!("stderr reader for '{}' panicked", cmd_str)))?;

        let status = child
            .wait()
            .map_err(|e| AppError::IO(format!("waiting for '{}'", cmd_str), e))?;

        let (stdout, stdout_overflow) =
            stdout_result.map_err(|e| AppError::IO(format!("reading stdout of '{}'", cmd_str), e))?;
        let (stderr, stderr_overflow) =
            stderr_result.map_err(|e| AppError::IO(format!("reading stderr of '{}'", cmd_str), e))?;

        if stdout_overflow || stderr_overflow {
            tracing::warn!(
                limit,
                stdout_overflow,
                stderr_overflow,
                "Output of '{}' exceeded the configured limit",
                cmd_str
            );
            return Err(GitError::OutputTooLarge {
                command: cmd_str,
                limit,
            }
            .into());
        }

        let output = CommandOutput {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            status,
        };

        if !output.is_success() {
            tracing::debug!(
                "Git cmd '{}' non-success {:?}. Stderr: [{}]",
                cmd_str,
                output.exit_code(),
                output.stderr.trim()
            );
        }

        Ok(output)
    }

    /// `capture` plus an exit status check; returns stdout on success.
    pub fn run(&self, limit: usize) -> AppResult<String> {
        let output = self.capture(limit)?;
        if !output.is_success() {
            return Err(map_command_output_error(&self.command_line(), output).into());
        }
        Ok(output.stdout)
    }
}

/// Read at most `limit` bytes and report whether more were available.
///
/// With `drain` set, anything past the cap is read and discarded so the
/// writer can run to completion.
fn read_capped<R: Read>(mut reader: R, limit: usize, drain: bool) -> io::Result<(Vec<u8>, bool)> {
    let mut buf = Vec::new();
    (&mut reader)
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)?;

    let overflow = buf.len() > limit;
    if overflow {
        buf.truncate(limit);
        if drain {
            io::copy(&mut reader, &mut io::sink())?;
        }
    }
    Ok((buf, overflow))
}

fn missing_pipe(cmd_str: &str, stream: &str) -> AppError {
    AppError::IO(
        format!("capturing {} of '{}'", stream, cmd_str),
        io::Error::new(io::ErrorKind::BrokenPipe, "stream was not piped"),
    )
}

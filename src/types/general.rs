use std::process::ExitStatus;

/// Represents the output of a command execution
///
/// This structure captures the stdout, stderr, and exit status
#[derive(Debug)]
pub struct CommandOutput {
    /// Standard output from the command
    pub stdout: String,

    /// Standard error output from the command
    pub stderr: String,

    /// Exit status of the command
    pub status: ExitStatus,
}

impl CommandOutput {
    /// Returns true if the command executed successfully
    pub fn is_success(&self) -> bool {
        self.status.success()
    }

    /// Returns the exit code of the command, if available
    pub fn exit_code(&self) -> Option<i32> {
        self.status.code()
    }
}

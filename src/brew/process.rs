use std::process::Stdio;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tracing::{debug, trace};

use super::BrewError;

/// How to invoke the package manager: a program plus any leading arguments
/// (for example `arch -x86_64 /usr/local/bin/brew`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Brew {
    program: String,
    base_args: Vec<String>,
}

impl Brew {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
        }
    }

    pub fn from_parts(program: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    /// Splits a configured command line on whitespace. Falls back to plain
    /// `brew` when the line is blank.
    pub fn from_command_line(line: &str) -> Self {
        let mut parts = line.split_whitespace().map(str::to_string);
        match parts.next() {
            Some(program) => Self::from_parts(program, parts.collect()),
            None => Self::new("brew"),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn display_command(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.base_args.iter().map(String::as_str));
        parts.extend(args.iter().copied());
        parts.join(" ")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.base_args)
            .args(args)
            .stdin(Stdio::null());
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> BrewError {
        BrewError::Spawn {
            program: self.program().to_string(),
            source,
        }
    }

    /// Runs the command to completion and captures its output.
    pub async fn run(&self, args: &[&str]) -> Result<CommandOutput, BrewError> {
        debug!(command = %self.display_command(args), "running");
        let output = self
            .command(args)
            .output()
            .await
            .map_err(|err| self.spawn_error(err))?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
            success: output.status.success(),
        };
        debug!(command = %self.display_command(args), code = ?result.code, "exited");
        Ok(result)
    }

    /// Spawns the command with both pipes captured and hands back a stream
    /// over their lines.
    pub fn stream(&self, args: &[&str]) -> Result<LineStream, BrewError> {
        debug!(command = %self.display_command(args), "streaming");
        let mut child = self
            .command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| self.spawn_error(err))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BrewError::Failed("stdout was not captured".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| BrewError::Failed("stderr was not captured".to_string()))?;

        Ok(LineStream {
            child,
            stdout: Some(BufReader::new(stdout).lines()),
            stderr: Some(BufReader::new(stderr).lines()),
        })
    }
}

#[derive(Clone, Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
    pub success: bool,
}

impl CommandOutput {
    pub fn ensure_success(&self, fallback: &str) -> Result<(), BrewError> {
        if self.success {
            return Ok(());
        }

        let message = first_nonempty_line(&self.stderr)
            .unwrap_or(fallback)
            .to_string();
        Err(BrewError::Failed(message))
    }

}

/// Combined stdout/stderr of a running child, line by line.
///
/// Lines arrive in the order the child writes them to each pipe; across the
/// two pipes the order is whichever becomes readable first.
pub struct LineStream {
    child: Child,
    stdout: Option<Lines<BufReader<ChildStdout>>>,
    stderr: Option<Lines<BufReader<ChildStderr>>>,
}

impl LineStream {
    /// Next line from either pipe, or `None` once both are closed.
    pub async fn next_line(&mut self) -> Result<Option<String>, BrewError> {
        loop {
            let (from_stdout, line) = tokio::select! {
                line = read_pipe(&mut self.stdout), if self.stdout.is_some() => (true, line),
                line = read_pipe(&mut self.stderr), if self.stderr.is_some() => (false, line),
                else => return Ok(None),
            };

            match line? {
                Some(line) => {
                    trace!(%line, "output");
                    return Ok(Some(line));
                }
                None if from_stdout => self.stdout = None,
                None => self.stderr = None,
            }
        }
    }

    /// Waits for the child to exit. Signal-terminated children report `-1`.
    pub async fn wait(mut self) -> Result<i32, BrewError> {
        self.stdout = None;
        self.stderr = None;
        let status = self.child.wait().await?;
        Ok(status.code().unwrap_or(-1))
    }
}

async fn read_pipe<R>(pipe: &mut Option<Lines<R>>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    match pipe {
        Some(lines) => lines.next_line().await,
        None => Ok(None),
    }
}

pub fn nonempty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn first_nonempty_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

use std::io::{self, Write};
use std::process::{Command, Stdio};

use anyhow::{Context, bail};
use tracing::debug;

/// Copy helpers tried in order; the first one installed wins.
const COPY_COMMANDS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

pub fn copy_text(text: &str) -> anyhow::Result<()> {
    for (program, args) in COPY_COMMANDS {
        match pipe_to(program, args, text) {
            Ok(()) => {
                debug!(program, bytes = text.len(), "copied to clipboard");
                return Ok(());
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err).with_context(|| format!("{program} failed")),
        }
    }
    bail!("no clipboard tool found (pbcopy, wl-copy, xclip or xsel)")
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("exited with {status}")))
    }
}

use std::process::Stdio;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn copy(&self, text: &str) -> Result<()>;
}

/// Copies by piping into whichever platform clipboard command is installed.
pub struct SystemClipboard;

const COMMANDS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// `Ok(false)` when the program isn't installed.
async fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<bool> {
    let mut child = match tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e).with_context(|| format!("Failed to run {program}")),
    };

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .with_context(|| format!("Failed to write to {program}"))?;
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for {program}"))?;
    if !status.success() {
        bail!("{program} exited with {status}");
    }
    Ok(true)
}

/// Try each command in turn until one succeeds.
async fn copy_with(commands: &[(&str, &[&str])], text: &str) -> Result<()> {
    let mut last_error = None;
    for (program, args) in commands {
        match pipe_into(program, args, text).await {
            Ok(true) => return Ok(()),
            Ok(false) => continue,
            Err(e) => {
                tracing::debug!(program, error = %e, "clipboard command failed");
                last_error = Some(e);
            }
        }
    }

    if let Some(e) = last_error {
        bail!("Clipboard command failed: {e:#}");
    }
    let tried: Vec<&str> = commands.iter().map(|(p, _)| *p).collect();
    bail!("No clipboard command available (tried {})", tried.join(", "))
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn copy(&self, text: &str) -> Result<()> {
        copy_with(COMMANDS, text).await
    }
}

use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Write};
use std::process::{Command, Stdio};
use tracing::warn;

const DEFAULT_PAGER: &str = "less -R";

/// Resolve the pager command: explicit setting, then `$PAGER`, then `less -R`.
pub fn pager_command(configured: Option<&str>) -> String {
    configured
        .map(str::to_string)
        .filter(|c| !c.trim().is_empty())
        .or_else(|| std::env::var("PAGER").ok().filter(|c| !c.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_PAGER.to_string())
}

/// Show `text` through a pager when stdout is a terminal, otherwise print it.
pub fn page(text: &str, configured: Option<&str>) -> Result<()> {
    if !io::stdout().is_terminal() {
        return print_plain(text);
    }

    let command = pager_command(configured);
    let mut child = match shell_command(&command).stdin(Stdio::piped()).spawn() {
        Ok(child) => child,
        Err(e) => {
            warn!(pager = %command, error = %e, "Could not start pager, printing directly");
            return print_plain(text);
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        // The user quitting the pager early closes the pipe.
        match stdin.write_all(text.as_bytes()) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
            other => other.context("failed to write to pager")?,
        }
    }

    child.wait().context("pager exited abnormally")?;
    Ok(())
}

/// Run the pager through the shell, as git does, so quoted arguments and
/// environment expansion in `$PAGER` keep working.
fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

fn print_plain(text: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())
        .and_then(|_| out.write_all(b"\n"))
        .context("failed to write page to stdout")
}

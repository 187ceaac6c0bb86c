use crate::error::{DraglyError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses wl-copy, then xclip, then xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // A tool can be installed but unusable (wl-copy outside Wayland), so keep trying.
    let mut last_failure = None;
    for cmd in CLIPBOARD_COMMANDS {
        match pipe_to(cmd.program, cmd.args, text) {
            Ok(()) => return Ok(()),
            Err(PipeError::Spawn) => continue,
            Err(PipeError::Failed(msg)) => last_failure = Some(msg),
        }
    }
    if let Some(msg) = last_failure {
        return Err(DraglyError::Clipboard(msg));
    }
    let tried: Vec<&str> = CLIPBOARD_COMMANDS.iter().map(|cmd| cmd.program).collect();
    Err(DraglyError::Clipboard(format!(
        "No clipboard command found (tried: {})",
        tried.join(", ")
    )))
}

struct ClipboardCommand {
    program: &'static str,
    args: &'static [&'static str],
}

#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[ClipboardCommand] = &[ClipboardCommand {
    program: "pbcopy",
    args: &[],
}];

#[cfg(target_os = "linux")]
const CLIPBOARD_COMMANDS: &[ClipboardCommand] = &[
    ClipboardCommand {
        program: "wl-copy",
        args: &[],
    },
    ClipboardCommand {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    ClipboardCommand {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
];

#[cfg(target_os = "windows")]
const CLIPBOARD_COMMANDS: &[ClipboardCommand] = &[ClipboardCommand {
    program: "clip",
    args: &[],
}];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CLIPBOARD_COMMANDS: &[ClipboardCommand] = &[];

#[derive(Debug)]
enum PipeError {
    Spawn,
    Failed(String),
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::result::Result<(), PipeError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|_| PipeError::Spawn)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| PipeError::Failed(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| PipeError::Failed(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(PipeError::Failed(format!("{} exited with error", program)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_spawn_error() {
        let result = pipe_to("dragly-definitely-not-a-real-binary", &[], "x");
        assert!(matches!(result, Err(PipeError::Spawn)));
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_cat_succeeds() {
        assert!(pipe_to("cat", &[], "hello").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_reports_failure() {
        let result = pipe_to("false", &[], "");
        assert!(matches!(result, Err(PipeError::Failed(_))));
    }
}

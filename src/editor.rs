use crate::error::EditorError;
use std::env;
use std::path::Path;
use std::process::{Command, Stdio};

pub const DEFAULT_EDITOR: &str = "vi";

pub fn editor_command() -> String {
    env::var("EDITOR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Splits an editor command line into program and arguments and appends
/// the file to edit.
pub fn build_command(
    editor: &str,
    path: &Path,
) -> Result<(String, Command), EditorError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(EditorError::EmptyCommand)?;
    let mut cmd = Command::new(program);
    cmd.args(parts)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    Ok((program.to_string(), cmd))
}

/// Runs `$EDITOR` on `path` and blocks until it exits. The caller is
/// responsible for handing the terminal over first.
pub fn edit_file(path: &Path) -> Result<(), EditorError> {
    edit_file_with(&editor_command(), path)
}

/// Runs the given editor command line on `path`.
pub fn edit_file_with(editor: &str, path: &Path) -> Result<(), EditorError> {
    let (program, mut cmd) = build_command(editor, path)?;
    log::info!("launching editor {program:?} for {}", path.display());
    let status = cmd.status().map_err(|source| EditorError::Spawn {
        program: program.clone(),
        source,
    })?;
    if !status.success() {
        return Err(EditorError::Failed { program, status });
    }
    Ok(())
}

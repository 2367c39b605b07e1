use anyhow::Result;
use std::{collections::VecDeque, fs, path::Path};

/// Deterministic command source for non-interactive runs.
///
/// Scripts are plain text: one command per line, executed in file order.
/// Lines whose first non-space character is `#` are comments. Blank lines are
/// kept, because an empty line is a meaningful no-op to the interpreter.
#[derive(Debug)]
pub struct CommandScriptPlayer {
    pending: VecDeque<String>,
}

impl CommandScriptPlayer {
    /// Load a command script from a file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Load a command script from an in-memory string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let pending: VecDeque<String> = contents
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .map(|line| line.to_string())
            .collect();
        if pending.is_empty() {
            anyhow::bail!("command script contains no steps");
        }
        Ok(Self { pending })
    }

    /// Next command line, in file order.
    pub fn next_command(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// Whether every command has been handed out.
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}

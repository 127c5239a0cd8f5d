//! Best-effort probes of external data sources
//!
//! A probe runs one command or reads one path and hands back its trimmed text.
//! Every failure (missing binary, non-zero exit, unreadable file) collapses
//! into [`ProbeResult::Unavailable`]; callers treat that as a normal outcome.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// Trimmed textual output
    Output(String),
    /// The source could not be read or executed
    Unavailable,
}

impl ProbeResult {
    fn from_text(text: &str) -> Self {
        ProbeResult::Output(text.trim().to_string())
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ProbeResult::Output(text) => Some(text),
            ProbeResult::Unavailable => None,
        }
    }

    /// Output text, treating an empty output the same as a failed probe
    pub fn non_empty(&self) -> Option<&str> {
        self.text().filter(|text| !text.is_empty())
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            ProbeResult::Output(text) => Some(text),
            ProbeResult::Unavailable => None,
        }
    }
}

/// Access to the host's commands and files
pub trait Prober {
    /// Run `program` with `args` and capture stdout
    fn command(&self, program: &str, args: &[&str]) -> ProbeResult;

    /// Read a whole file
    fn file(&self, path: &Path) -> ProbeResult;

    /// Whether `program` resolves on `PATH`
    fn has_command(&self, program: &str) -> bool;

    /// Count directories exactly `depth` levels below `path`
    fn count_dirs(&self, path: &Path, depth: usize) -> Option<usize>;
}

/// Prober backed by the real operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProber;

impl Prober for SystemProber {
    fn command(&self, program: &str, args: &[&str]) -> ProbeResult {
        match Command::new(program).args(args).output() {
            Ok(output) if output.status.success() => {
                ProbeResult::from_text(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                debug!(program, ?args, status = %output.status, "command exited unsuccessfully");
                ProbeResult::Unavailable
            }
            Err(err) => {
                debug!(program, ?args, error = %err, "command could not be spawned");
                ProbeResult::Unavailable
            }
        }
    }

    fn file(&self, path: &Path) -> ProbeResult {
        match fs::read(path) {
            Ok(bytes) => ProbeResult::from_text(&String::from_utf8_lossy(&bytes)),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "file not readable");
                ProbeResult::Unavailable
            }
        }
    }

    fn has_command(&self, program: &str) -> bool {
        is_on_path(program, env::var_os("PATH"))
    }

    fn count_dirs(&self, path: &Path, depth: usize) -> Option<usize> {
        count_dirs_at_depth(path, depth)
    }
}

/// Resolve `program` against `search_path` in-process, without a `which` binary
fn is_on_path(program: &str, search_path: Option<OsString>) -> bool {
    let Ok(cwd) = env::current_dir() else {
        return false;
    };
    which::which_in(program, search_path, cwd).is_ok()
}

fn count_dirs_at_depth(path: &Path, depth: usize) -> Option<usize> {
    let entries = fs::read_dir(path).ok()?;
    let mut total = 0;
    for entry in entries.flatten() {
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }
        if depth <= 1 {
            total += 1;
        } else {
            total += count_dirs_at_depth(&entry.path(), depth - 1).unwrap_or(0);
        }
    }
    Some(total)
}

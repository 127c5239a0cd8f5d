//! Login user and shell

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use crate::facts::ResolveContext;
use crate::probe::Prober;

pub fn resolve_user(_ctx: &ResolveContext<'_>) -> Result<String> {
    std::env::var("USER").context("USER is not set")
}

pub fn resolve_shell(ctx: &ResolveContext<'_>) -> Result<String> {
    let shell = std::env::var("SHELL").context("SHELL is not set")?;
    describe_shell(ctx.prober, &shell).context("SHELL is empty")
}

/// Shell binary name, followed by its version when `--version` reports one
fn describe_shell(prober: &dyn Prober, shell_path: &str) -> Option<String> {
    let name = Path::new(shell_path.trim())
        .file_name()?
        .to_string_lossy()
        .into_owned();

    let version = prober
        .command(shell_path.trim(), &["--version"])
        .text()
        .and_then(parse_version);

    Some(match version {
        Some(version) => format!("{} {}", name, version),
        None => name,
    })
}

/// First dotted version number on the first line of `--version` output
fn parse_version(output: &str) -> Option<String> {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    let pattern = VERSION.get_or_init(|| Regex::new(r"\d+(\.\d+)+").expect("version pattern is valid"));

    pattern
        .find(output.lines().next()?)
        .map(|found| found.as_str().to_string())
}

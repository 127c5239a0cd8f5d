//! Operating system name and version

use anyhow::{Context, Result};
use std::path::Path;

use crate::facts::ResolveContext;
use crate::platform::Platform;
use crate::probe::Prober;

const PROC_VERSION: &str = "/proc/version";
const OS_RELEASE: &str = "/etc/os-release";

pub fn resolve(ctx: &ResolveContext<'_>) -> Result<String> {
    match ctx.platform {
        Platform::Darwin => darwin_version(ctx.prober),
        Platform::Linux => linux_version(ctx.prober),
        Platform::Other(_) => Ok(format!("Unknown {}", ctx.platform)),
    }
}

/// `"{product} {version} ({build})"` from `sw_vers`
fn darwin_version(prober: &dyn Prober) -> Result<String> {
    let sw_vers = |flag: &str| {
        prober
            .command("sw_vers", &[flag])
            .into_option()
            .with_context(|| format!("sw_vers {} unavailable", flag))
    };

    let name = sw_vers("-productName")?;
    let version = sw_vers("-productVersion")?;
    let build = sw_vers("-buildVersion")?;

    Ok(format!("{} {} ({})", name, version, build))
}

/// `"{distro} (Linux {kernel})"`
fn linux_version(prober: &dyn Prober) -> Result<String> {
    let version = prober
        .file(Path::new(PROC_VERSION))
        .into_option()
        .with_context(|| format!("failed to read {}", PROC_VERSION))?;
    let kernel = parse_kernel_release(&version)
        .with_context(|| format!("unexpected format in {}", PROC_VERSION))?;

    let release = prober
        .file(Path::new(OS_RELEASE))
        .into_option()
        .with_context(|| format!("failed to read {}", OS_RELEASE))?;
    let distro = parse_pretty_name(&release)
        .with_context(|| format!("no PRETTY_NAME in {}", OS_RELEASE))?;

    Ok(format!("{} (Linux {})", distro, kernel))
}

/// Third whitespace-delimited token of the first line:
/// "Linux version 6.8.0-45-generic (buildd@lcy02) ..."
fn parse_kernel_release(proc_version: &str) -> Option<&str> {
    proc_version.lines().next()?.split_whitespace().nth(2)
}

fn parse_pretty_name(os_release: &str) -> Option<String> {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .map(|value| value.replace(['"', '\''], "").trim().to_string())
}

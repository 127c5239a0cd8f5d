//! CPU detection module
//!
//! Detects the CPU brand string using:
//! - Cross-platform: sysinfo crate
//! - macOS fallback: `sysctl -n machdep.cpu.brand_string`
//!
//! and appends the machine architecture reported by `uname -m`.

use anyhow::Result;
use sysinfo::System;

use crate::facts::{ResolveContext, UNKNOWN};
use crate::platform::Platform;

pub fn resolve(ctx: &ResolveContext<'_>) -> Result<String> {
    Ok(describe(ctx, sysinfo_brand()))
}

fn sysinfo_brand() -> Option<String> {
    let mut sys = System::new();
    sys.refresh_cpu_all();

    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
}

fn describe(ctx: &ResolveContext<'_>, brand: Option<String>) -> String {
    let brand = brand
        .or_else(|| match ctx.platform {
            Platform::Darwin => ctx
                .prober
                .command("sysctl", &["-n", "machdep.cpu.brand_string"])
                .non_empty()
                .map(str::to_string),
            _ => None,
        })
        .unwrap_or_else(|| UNKNOWN.to_string());

    let arch = ctx
        .prober
        .command("uname", &["-m"])
        .non_empty()
        .map(str::to_string)
        .unwrap_or_else(|| std::env::consts::ARCH.to_string());

    format!("{} ({})", collapse_whitespace(&brand), arch)
}

/// Brand strings from cpuid often carry runs of padding spaces
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

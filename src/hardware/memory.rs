//! Memory usage
//!
//! Reports `used / total (percent%)` where used = total − available, both
//! read through sysinfo.

use anyhow::{bail, Result};
use sysinfo::System;

use crate::facts::ResolveContext;

/// Size units, largest first. Nothing above MB.
const UNITS: &[(u64, &str)] = &[(1 << 20, " MB"), (1 << 10, " KB")];

pub fn resolve(_ctx: &ResolveContext<'_>) -> Result<String> {
    let mut sys = System::new();
    sys.refresh_memory();

    format_memory(sys.total_memory(), sys.available_memory())
}

/// Render used and total memory from byte counts
pub fn format_memory(total: u64, available: u64) -> Result<String> {
    if total == 0 {
        bail!("total memory reported as zero");
    }

    let used = total.saturating_sub(available);
    let percent = used as f64 / total as f64 * 100.0;

    Ok(format!(
        "{} / {} ({:.1}%)",
        pretty_size(used),
        pretty_size(total),
        percent
    ))
}

/// Human-readable size using the largest unit the value reaches, truncating
/// the amount
pub fn pretty_size(bytes: u64) -> String {
    for &(factor, suffix) in UNITS {
        if bytes >= factor {
            return format!("{}{}", bytes / factor, suffix);
        }
    }

    if bytes == 1 {
        "1 byte".to_string()
    } else {
        format!("{} bytes", bytes)
    }
}

//! GPU detection module
//!
//! Detects graphics adapters using:
//! - Linux: Parse `lspci` output (VGA, 3D and display controllers)
//! - macOS: Parse `system_profiler SPDisplaysDataType`
//!
//! Multiple adapters are joined with ", ".

use anyhow::{bail, Context, Result};

use crate::facts::ResolveContext;
use crate::platform::Platform;
use crate::probe::Prober;

/// GPU vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
}

impl std::fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpuVendor::Nvidia => write!(f, "NVIDIA"),
            GpuVendor::Amd => write!(f, "AMD"),
            GpuVendor::Intel => write!(f, "Intel"),
        }
    }
}

/// Corporate prefixes as printed by `lspci`, longest first
const VENDOR_PREFIXES: &[(&str, GpuVendor)] = &[
    ("Advanced Micro Devices, Inc. [AMD/ATI]", GpuVendor::Amd),
    ("Advanced Micro Devices, Inc. [AMD]", GpuVendor::Amd),
    ("NVIDIA Corporation", GpuVendor::Nvidia),
    ("Intel Corporation", GpuVendor::Intel),
];

pub fn resolve(ctx: &ResolveContext<'_>) -> Result<String> {
    let gpus = match ctx.platform {
        Platform::Linux => detect_lspci(ctx.prober)?,
        Platform::Darwin => detect_system_profiler(ctx.prober)?,
        Platform::Other(name) => bail!("no GPU probe for {}", name),
    };

    if gpus.is_empty() {
        bail!("no display adapters reported");
    }
    Ok(gpus.join(", "))
}

/// Detect GPUs using lspci (Linux only)
fn detect_lspci(prober: &dyn Prober) -> Result<Vec<String>> {
    let output = prober.command("lspci", &[]);
    let stdout = output.text().context("lspci not available")?;

    Ok(stdout.lines().filter_map(parse_lspci_line).collect())
}

/// Parse a single lspci line
///
/// Format: "01:00.0 VGA compatible controller: NVIDIA Corporation GA104 [GeForce RTX 3070] (rev a1)"
fn parse_lspci_line(line: &str) -> Option<String> {
    let is_display = line.contains("VGA")
        || line.contains("3D controller")
        || line.contains("Display controller");
    if !is_display {
        return None;
    }

    let idx = line.find(": ")?;
    let mut device = &line[idx + 2..];
    // Remove revision info
    if let Some(rev_idx) = device.rfind(" (rev") {
        device = &device[..rev_idx];
    }

    Some(shorten_device_name(device.trim()))
}

/// Replace the corporate vendor prefix with a short vendor name and prefer
/// the bracketed marketing name when `lspci` provides one
fn shorten_device_name(device: &str) -> String {
    for (prefix, vendor) in VENDOR_PREFIXES {
        if let Some(rest) = device.strip_prefix(prefix) {
            let rest = rest.trim();
            let product = match (rest.rfind('['), rest.ends_with(']')) {
                (Some(open), true) => &rest[open + 1..rest.len() - 1],
                _ => rest,
            };
            return format!("{} {}", vendor, product.trim());
        }
    }
    device.to_string()
}

/// Detect GPUs using system_profiler (macOS only)
fn detect_system_profiler(prober: &dyn Prober) -> Result<Vec<String>> {
    let output = prober.command("system_profiler", &["SPDisplaysDataType"]);
    let stdout = output.text().context("system_profiler not available")?;

    Ok(stdout
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Chipset Model:"))
        .map(|model| model.trim().to_string())
        .filter(|model| !model.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::probe::testing::FakeProber;

    const LSPCI: &str = "\
00:00.0 Host bridge: Intel Corporation 12th Gen Core Processor Host Bridge/DRAM Registers (rev 02)
00:02.0 VGA compatible controller: Intel Corporation Alder Lake-P GT2 [Iris Xe Graphics] (rev 0c)
00:14.0 USB controller: Intel Corporation Alder Lake PCH USB 3.2 xHCI Host Controller (rev 01)
01:00.0 3D controller: NVIDIA Corporation GA107M [GeForce RTX 3050 Mobile] (rev a1)
";

    fn resolve_on(platform: Platform, prober: &FakeProber) -> Result<String> {
        let model = ModelConfig::default();
        let ctx = ResolveContext {
            prober,
            platform: &platform,
            model: &model,
            lookup: None,
        };
        resolve(&ctx)
    }

    #[test]
    fn test_lspci_lists_every_display_adapter() {
        let prober = FakeProber::new().with_command("lspci", LSPCI);
        assert_eq!(
            resolve_on(Platform::Linux, &prober).unwrap(),
            "Intel Iris Xe Graphics, NVIDIA GeForce RTX 3050 Mobile"
        );
    }

    #[test]
    fn test_amd_vendor_bracket_is_not_the_product() {
        let line = "03:00.0 VGA compatible controller: Advanced Micro Devices, Inc. [AMD/ATI] Navi 21 [Radeon RX 6800/6800 XT / 6900 XT] (rev c1)";
        assert_eq!(
            parse_lspci_line(line).as_deref(),
            Some("AMD Radeon RX 6800/6800 XT / 6900 XT")
        );
    }

    #[test]
    fn test_unknown_vendor_is_kept_verbatim() {
        let line = "00:02.0 VGA compatible controller: Red Hat, Inc. Virtio 1.0 GPU (rev 01)";
        assert_eq!(
            parse_lspci_line(line).as_deref(),
            Some("Red Hat, Inc. Virtio 1.0 GPU")
        );
    }

    #[test]
    fn test_non_display_lines_are_skipped() {
        assert_eq!(
            parse_lspci_line("00:14.0 USB controller: Intel Corporation xHCI (rev 01)"),
            None
        );
    }

    #[test]
    fn test_system_profiler_chipsets() {
        let output = "Graphics/Displays:\n\n    Apple M1 Pro:\n\n      Chipset Model: Apple M1 Pro\n      Type: GPU\n";
        let prober = FakeProber::new().with_command("system_profiler SPDisplaysDataType", output);
        assert_eq!(resolve_on(Platform::Darwin, &prober).unwrap(), "Apple M1 Pro");
    }

    #[test]
    fn test_missing_lspci_is_an_error() {
        assert!(resolve_on(Platform::Linux, &FakeProber::new()).is_err());
    }
}

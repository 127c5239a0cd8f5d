//! Machine model detection
//!
//! - Linux: DMI board and product strings, devicetree model, and the
//!   OpenWrt-style `/tmp/sysinfo/model` override. Later sources win.
//! - macOS / iOS: hardware identifier from `sysctl`, translated by the
//!   built-in table or the remote lookup service.
//!
//! The result is scrubbed of firmware placeholder strings.

use anyhow::{bail, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::model_table;
use crate::config::ModelSource;
use crate::facts::{ResolveContext, UNKNOWN};
use crate::platform::{is_mobile_identifier, Platform};
use crate::probe::Prober;

const DMI_DIR: &str = "/sys/devices/virtual/dmi/id";
const DEVICETREE_MODEL: &str = "/sys/firmware/devicetree/base/model";
const SYSINFO_MODEL: &str = "/tmp/sysinfo/model";

/// Kernel extensions that only ship on non-Apple hardware running macOS
const HACKINTOSH_KEXTS: &[&str] = &["FakeSMC", "VirtualSMC"];

/// Placeholder cleanup, applied in order
const PLACEHOLDER_RULES: &[(&str, &str)] = &[
    (r"(?i)to be filled by o\.?e\.?m\.?", ""),
    (r"To Be Filled.*", ""),
    (r"OEM.*", ""),
    (r"Not Applicable", ""),
    (r"System Product Name", ""),
    (r"System Version", ""),
    (r"Undefined", ""),
    (r"Default string", ""),
    (r"Not Specified", ""),
    (r"Type1ProductConfigId", ""),
    (r"INVALID", ""),
    (r"All Series", ""),
    (r"[\x{0}\x{FFFD}]", ""),
    (r"\s{2,}", " "),
];

fn placeholder_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        PLACEHOLDER_RULES
            .iter()
            .map(|(pattern, replacement)| {
                (
                    Regex::new(pattern).expect("placeholder pattern is valid"),
                    *replacement,
                )
            })
            .collect()
    })
}

pub fn resolve(ctx: &ResolveContext<'_>) -> Result<String> {
    let raw = match ctx.platform {
        Platform::Linux => linux_model(ctx.prober),
        Platform::Darwin => darwin_model(ctx),
        Platform::Other(name) => {
            debug!(platform = %name, "no model probe for platform");
            None
        }
    };

    let model = clean_model(raw.as_deref().unwrap_or_default());
    if model == UNKNOWN {
        bail!("no model source produced a usable name");
    }
    Ok(model)
}

/// Most specific source wins: each readable source replaces the previous one
fn linux_model(prober: &dyn Prober) -> Option<String> {
    let dmi = |file: &str| prober.file(&Path::new(DMI_DIR).join(file)).into_option();
    let mut model = None;

    if let Some(board) = join_present(&[dmi("board_vendor"), dmi("board_name")]) {
        model = Some(board);
    }
    if let Some(product) = join_present(&[dmi("product_name"), dmi("product_version")]) {
        model = Some(product);
    }
    if let Some(tree) = prober.file(Path::new(DEVICETREE_MODEL)).into_option() {
        model = Some(tree);
    }
    if let Some(sysinfo) = prober.file(Path::new(SYSINFO_MODEL)).into_option() {
        model = Some(sysinfo);
    }

    model
}

fn join_present(parts: &[Option<String>]) -> Option<String> {
    let present: Vec<&str> = parts.iter().flatten().map(String::as_str).collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(" "))
    }
}

fn darwin_model(ctx: &ResolveContext<'_>) -> Option<String> {
    let sysctl = |key: &str| {
        ctx.prober
            .command("sysctl", &["-n", key])
            .non_empty()
            .map(str::to_string)
    };

    let identifier = sysctl("hw.machine")
        .filter(|machine| is_mobile_identifier(machine))
        .or_else(|| sysctl("hw.model"))?;

    let mut model = translate_identifier(ctx, &identifier);
    if !is_mobile_identifier(&identifier) && is_hackintosh(ctx.prober) {
        model.push_str(" (Hackintosh)");
    }
    Some(model)
}

/// Marketing name for an Apple identifier; unknown identifiers pass through
fn translate_identifier(ctx: &ResolveContext<'_>, identifier: &str) -> String {
    match ctx.model.source {
        ModelSource::Table => model_table::lookup(identifier)
            .map(str::to_string)
            .unwrap_or_else(|| identifier.to_string()),
        ModelSource::Remote => match ctx.lookup {
            Some(lookup) => lookup.lookup(identifier).unwrap_or_else(|err| {
                warn!(identifier, "model lookup failed: {}", err);
                identifier.to_string()
            }),
            None => identifier.to_string(),
        },
    }
}

fn is_hackintosh(prober: &dyn Prober) -> bool {
    prober
        .command("kextstat", &[])
        .text()
        .map(|loaded| HACKINTOSH_KEXTS.iter().any(|kext| loaded.contains(kext)))
        .unwrap_or(false)
}

/// Strip firmware placeholders, tag QEMU machines, and fall back to "Unknown"
pub fn clean_model(raw: &str) -> String {
    let mut model = raw.to_string();
    for (pattern, replacement) in placeholder_rules() {
        model = pattern.replace_all(&model, *replacement).into_owned();
    }

    let mut model = model.trim().to_string();
    if model.contains("Standard PC") {
        model.push_str(" (KVM)");
    }
    if model.is_empty() {
        return UNKNOWN.to_string();
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DeviceLookup, LookupError};
    use crate::config::ModelConfig;
    use crate::probe::testing::FakeProber;

    struct NotFoundLookup;

    impl DeviceLookup for NotFoundLookup {
        fn lookup(&self, _identifier: &str) -> Result<String, LookupError> {
            Err(LookupError::Status { status: 404 })
        }
    }

    struct FixedLookup(&'static str);

    impl DeviceLookup for FixedLookup {
        fn lookup(&self, _identifier: &str) -> Result<String, LookupError> {
            Ok(self.0.to_string())
        }
    }

    fn resolve_with(
        platform: Platform,
        prober: &FakeProber,
        source: ModelSource,
        lookup: Option<&dyn DeviceLookup>,
    ) -> Result<String> {
        let model = ModelConfig {
            source,
            ..ModelConfig::default()
        };
        let ctx = ResolveContext {
            prober,
            platform: &platform,
            model: &model,
            lookup,
        };
        resolve(&ctx)
    }

    fn ipad() -> FakeProber {
        FakeProber::new()
            .with_command("sysctl -n hw.machine", "iPad7,6")
            .with_command("sysctl -n hw.model", "J72AP")
    }

    #[test]
    fn test_table_translates_ipad() {
        let model = resolve_with(Platform::Darwin, &ipad(), ModelSource::Table, None).unwrap();
        assert_eq!(model, "iPad 6");
    }

    #[test]
    fn test_table_passes_unknown_identifier_through() {
        let prober = FakeProber::new()
            .with_command("sysctl -n hw.machine", "iPhone99,9");
        let model = resolve_with(Platform::Darwin, &prober, ModelSource::Table, None).unwrap();
        assert_eq!(model, "iPhone99,9");
    }

    #[test]
    fn test_remote_not_found_returns_identifier() {
        let model = resolve_with(
            Platform::Darwin,
            &ipad(),
            ModelSource::Remote,
            Some(&NotFoundLookup),
        )
        .unwrap();
        assert_eq!(model, "iPad7,6");
    }

    #[test]
    fn test_remote_success_uses_lookup() {
        let model = resolve_with(
            Platform::Darwin,
            &ipad(),
            ModelSource::Remote,
            Some(&FixedLookup("iPad (6th generation)")),
        )
        .unwrap();
        assert_eq!(model, "iPad (6th generation)");
    }

    #[test]
    fn test_mac_desktop_uses_hw_model_and_detects_hackintosh() {
        let prober = FakeProber::new()
            .with_command("sysctl -n hw.machine", "x86_64")
            .with_command("sysctl -n hw.model", "iMac19,1")
            .with_command("kextstat", "  62    0 0xffffff7f8 com.rehabman.driver.VirtualSMC (1.3.2)");
        let model = resolve_with(Platform::Darwin, &prober, ModelSource::Table, None).unwrap();
        assert_eq!(model, "iMac19,1 (Hackintosh)");
    }

    #[test]
    fn test_mac_without_smc_emulator() {
        let prober = FakeProber::new()
            .with_command("sysctl -n hw.machine", "arm64")
            .with_command("sysctl -n hw.model", "MacBookPro18,3")
            .with_command("kextstat", "com.apple.kpi.bsd (23.0.0)");
        let model = resolve_with(Platform::Darwin, &prober, ModelSource::Table, None).unwrap();
        assert_eq!(model, "MacBookPro18,3");
    }

    #[test]
    fn test_linux_later_sources_override_earlier() {
        let prober = FakeProber::new()
            .with_file("/sys/devices/virtual/dmi/id/board_vendor", "LENOVO")
            .with_file("/sys/devices/virtual/dmi/id/board_name", "21CB")
            .with_file("/sys/devices/virtual/dmi/id/product_name", "21CBCTO1WW")
            .with_file("/sys/devices/virtual/dmi/id/product_version", "ThinkPad X1 Carbon Gen 10");
        let model = resolve_with(Platform::Linux, &prober, ModelSource::Table, None).unwrap();
        assert_eq!(model, "21CBCTO1WW ThinkPad X1 Carbon Gen 10");

        let prober = prober
            .with_file("/sys/firmware/devicetree/base/model", "Raspberry Pi 4 Model B Rev 1.4\0");
        let model = resolve_with(Platform::Linux, &prober, ModelSource::Table, None).unwrap();
        assert_eq!(model, "Raspberry Pi 4 Model B Rev 1.4");

        let prober = prober.with_file("/tmp/sysinfo/model", "Xiaomi Mi Router 4A");
        let model = resolve_with(Platform::Linux, &prober, ModelSource::Table, None).unwrap();
        assert_eq!(model, "Xiaomi Mi Router 4A");
    }

    #[test]
    fn test_board_only_machine() {
        let prober = FakeProber::new()
            .with_file("/sys/devices/virtual/dmi/id/board_vendor", "ASUSTeK COMPUTER INC.")
            .with_file("/sys/devices/virtual/dmi/id/board_name", "PRIME B450M-A");
        let model = resolve_with(Platform::Linux, &prober, ModelSource::Table, None).unwrap();
        assert_eq!(model, "ASUSTeK COMPUTER INC. PRIME B450M-A");
    }

    #[test]
    fn test_placeholders_only_is_an_error() {
        let prober = FakeProber::new()
            .with_file("/sys/devices/virtual/dmi/id/product_name", "System Product Name")
            .with_file("/sys/devices/virtual/dmi/id/product_version", "To Be Filled By O.E.M.");
        assert!(resolve_with(Platform::Linux, &prober, ModelSource::Table, None).is_err());
    }

    #[test]
    fn test_clean_model_strips_placeholders() {
        assert_eq!(clean_model("Gigabyte Technology Co., Ltd. Default string"), "Gigabyte Technology Co., Ltd.");
        assert_eq!(clean_model("MSI MS-7C02 To be filled by O.E.M."), "MSI MS-7C02");
        assert_eq!(clean_model("ASRock Not Specified X570 Taichi"), "ASRock X570 Taichi");
        assert_eq!(clean_model("  Dell Inc. OptiPlex 7050  "), "Dell Inc. OptiPlex 7050");
    }

    #[test]
    fn test_clean_model_tags_kvm() {
        assert_eq!(
            clean_model("QEMU Standard PC (Q35 + ICH9, 2009) pc-q35-8.2"),
            "QEMU Standard PC (Q35 + ICH9, 2009) pc-q35-8.2 (KVM)"
        );
    }

    #[test]
    fn test_clean_model_never_empty() {
        assert_eq!(clean_model(""), "Unknown");
        assert_eq!(clean_model("Default string Default string"), "Unknown");
        assert_eq!(clean_model("   "), "Unknown");
    }

    #[test]
    fn test_other_platform_has_no_model() {
        let platform = Platform::Other("FreeBSD".to_string());
        assert!(resolve_with(platform, &FakeProber::new(), ModelSource::Table, None).is_err());
    }
}

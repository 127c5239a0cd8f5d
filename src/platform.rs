//! Host platform detection

use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

use crate::probe::{Prober, SystemProber};

/// Kernel family reported by `uname`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Darwin,
    Other(String),
}

static CURRENT: OnceLock<Platform> = OnceLock::new();

impl Platform {
    /// Platform of the running host, probed once per process
    pub fn current() -> &'static Platform {
        CURRENT.get_or_init(|| Self::detect(&SystemProber))
    }

    pub fn detect(prober: &dyn Prober) -> Self {
        let name = prober
            .command("uname", &[])
            .into_option()
            .unwrap_or_else(|| std::env::consts::OS.to_string());
        let platform = Self::from_uname(&name);
        debug!(?platform, "detected platform");
        platform
    }

    pub fn from_uname(name: &str) -> Self {
        match name.trim() {
            "Linux" | "linux" => Platform::Linux,
            "Darwin" | "macos" | "ios" => Platform::Darwin,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "Linux"),
            Platform::Darwin => write!(f, "Darwin"),
            Platform::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Whether a Darwin hardware identifier names a phone, tablet, or other
/// non-desktop Apple device
pub fn is_mobile_identifier(identifier: &str) -> bool {
    ["iPhone", "iPad", "iPod", "AppleTV", "Watch"]
        .iter()
        .any(|prefix| identifier.starts_with(prefix))
}

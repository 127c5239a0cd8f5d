//! Installed package counts
//!
//! Each supported package manager is checked for presence on `PATH`; present
//! managers contribute `"{count} {name}"`. Managers that are missing, fail,
//! or report zero packages are left out.

use anyhow::{bail, Result};
use std::path::Path;
use tracing::debug;

use crate::facts::ResolveContext;
use crate::probe::Prober;

/// How a package manager's installed set is counted
enum Counter {
    /// Package directories `depth` levels below a database directory
    Directories { path: &'static str, depth: usize },
    /// Output lines of a listing command, optionally only those with a prefix
    Lines {
        args: &'static [&'static str],
        prefix: Option<&'static str>,
    },
}

struct PackageManager {
    name: &'static str,
    binary: &'static str,
    counter: Counter,
}

/// Display order of the packages fact
const MANAGERS: &[PackageManager] = &[
    PackageManager {
        name: "pacman",
        binary: "pacman",
        counter: Counter::Directories {
            path: "/var/lib/pacman/local",
            depth: 1,
        },
    },
    PackageManager {
        name: "rpm",
        binary: "rpm",
        counter: Counter::Lines {
            args: &["-qa"],
            prefix: None,
        },
    },
    PackageManager {
        name: "emerge",
        binary: "emerge",
        counter: Counter::Directories {
            path: "/var/db/pkg",
            depth: 2,
        },
    },
    PackageManager {
        name: "xbps",
        binary: "xbps-query",
        counter: Counter::Lines {
            args: &["-l"],
            prefix: None,
        },
    },
    PackageManager {
        name: "dpkg",
        binary: "dpkg",
        counter: Counter::Lines {
            args: &["-l"],
            prefix: Some("ii "),
        },
    },
    PackageManager {
        name: "brew",
        binary: "brew",
        counter: Counter::Lines {
            args: &["list", "-1"],
            prefix: None,
        },
    },
    PackageManager {
        name: "port",
        binary: "port",
        counter: Counter::Lines {
            args: &["-q", "installed"],
            prefix: None,
        },
    },
];

/// Installed package count for one manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManagerCount {
    pub manager_name: &'static str,
    pub count: usize,
}

pub fn resolve(ctx: &ResolveContext<'_>) -> Result<String> {
    let counts = count_packages(ctx.prober);
    if counts.is_empty() {
        bail!("no supported package manager found");
    }

    Ok(counts
        .iter()
        .map(|entry| format!("{} {}", entry.count, entry.manager_name))
        .collect::<Vec<_>>()
        .join(", "))
}

pub fn count_packages(prober: &dyn Prober) -> Vec<PackageManagerCount> {
    MANAGERS
        .iter()
        .filter(|manager| prober.has_command(manager.binary))
        .filter_map(|manager| {
            let count = count_installed(prober, manager)?;
            debug!(manager = manager.name, count, "counted packages");
            // An empty database is reported the same as a missing manager
            (count > 0).then_some(PackageManagerCount {
                manager_name: manager.name,
                count,
            })
        })
        .collect()
}

fn count_installed(prober: &dyn Prober, manager: &PackageManager) -> Option<usize> {
    match &manager.counter {
        Counter::Directories { path, depth } => prober.count_dirs(Path::new(path), *depth),
        Counter::Lines { args, prefix } => {
            let output = prober.command(manager.binary, args);
            let listing = output.text()?;
            Some(
                listing
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .filter(|line| prefix.map_or(true, |prefix| line.starts_with(prefix)))
                    .count(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::platform::Platform;
    use crate::probe::testing::FakeProber;

    fn resolve_with(prober: &FakeProber) -> Result<String> {
        let model = ModelConfig::default();
        let ctx = ResolveContext {
            prober,
            platform: &Platform::Linux,
            model: &model,
            lookup: None,
        };
        resolve(&ctx)
    }

    #[test]
    fn test_fixed_order_regardless_of_discovery() {
        let prober = FakeProber::new()
            .with_command("brew list -1", "git\nripgrep\nwget\n")
            .with_command("rpm -qa", "bash-5.2\ncoreutils-9.3\n")
            .with_installed("pacman")
            .with_dirs("/var/lib/pacman/local", 812);
        assert_eq!(
            resolve_with(&prober).unwrap(),
            "812 pacman, 2 rpm, 3 brew"
        );
    }

    #[test]
    fn test_dpkg_counts_installed_rows_only() {
        let listing = "\
Desired=Unknown/Install/Remove/Purge/Hold
| Status=Not/Inst/Conf-files/Unpacked/halF-conf/Half-inst/trig-aWait/Trig-pend
||/ Name           Version      Architecture Description
+++-==============-============-============-=================================
ii  adduser        3.134        all          add and remove users and groups
ii  apt            2.6.1        amd64        commandline package manager
rc  old-package    1.0          amd64        removed but configured
";
        let prober = FakeProber::new().with_command("dpkg -l", listing);
        assert_eq!(resolve_with(&prober).unwrap(), "2 dpkg");
    }

    #[test]
    fn test_emerge_counts_two_levels() {
        let prober = FakeProber::new()
            .with_installed("emerge")
            .with_dirs("/var/db/pkg", 1043);
        assert_eq!(
            count_packages(&prober),
            vec![PackageManagerCount {
                manager_name: "emerge",
                count: 1043
            }]
        );
    }

    #[test]
    fn test_failing_or_empty_managers_are_omitted() {
        // xbps-query installed but its listing fails; port lists nothing
        let prober = FakeProber::new()
            .with_installed("xbps-query")
            .with_command("port -q installed", "")
            .with_command("rpm -qa", "glibc-2.39\n");
        assert_eq!(resolve_with(&prober).unwrap(), "1 rpm");
    }

    #[test]
    fn test_no_managers_is_an_error() {
        assert!(resolve_with(&FakeProber::new()).is_err());
    }
}

//! boxfetch - system information at a glance
//!
//! Probes the host for its OS, hardware model, CPU/GPU, package counts,
//! shell, memory and uptime, and prints them as a compact color-coded box.
//! Every probe is best-effort: a missing source shows up as "Unknown".

mod api;
mod config;
mod facts;
mod hardware;
mod host;
mod platform;
mod probe;
mod report;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::api::{DeviceLookup, LookupClient};
use crate::config::{Config, ModelSource};
use crate::facts::ResolveContext;
use crate::platform::Platform;
use crate::probe::SystemProber;
use crate::report::Report;

/// boxfetch - Show a compact summary of this machine
#[derive(Parser, Debug)]
#[command(name = "boxfetch")]
#[command(author = "boxfetch contributors")]
#[command(about = "Show a compact, color-coded summary of this machine")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print version information and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Skip probes that run slow commands (accepted, currently has no effect)
    #[arg(short = 'l', long = "skip-long-commands")]
    skip_long_commands: bool,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let prober = SystemProber;

    if cli.version {
        println!("{}", version::version_string(&prober));
        return Ok(());
    }

    if cli.skip_long_commands {
        debug!("--skip-long-commands is accepted but does not change any probe");
    }

    let config = Config::load()?;
    let platform = Platform::current();

    let lookup = match (config.model.source, platform) {
        (ModelSource::Remote, Platform::Darwin) => match LookupClient::new(&config.model) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!("model lookup disabled: {}", err);
                None
            }
        },
        _ => None,
    };

    let ctx = ResolveContext {
        prober: &prober,
        platform,
        model: &config.model,
        lookup: lookup.as_ref().map(|client| client as &dyn DeviceLookup),
    };

    let report = Report::from_config(&config.display);
    let host_facts = facts::collect(&ctx, &report);
    println!("{}", report.render(&host_facts));

    Ok(())
}

/// Log to stderr so the report on stdout stays clean; `RUST_LOG` overrides
/// the default `warn` level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

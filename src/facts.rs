//! Host fact collection
//!
//! Every displayed fact has exactly one resolver. Resolvers never see each
//! other's output and may fail freely: [`resolve`] turns any error or empty
//! result into the literal `"Unknown"`, so a fact value is always defined.

use anyhow::Result;
use colored::Color;
use std::fmt;
use tracing::{debug, warn};

use crate::api::DeviceLookup;
use crate::config::ModelConfig;
use crate::hardware::{cpu, gpu, memory, model};
use crate::host::{os, packages, session, uptime};
use crate::platform::Platform;
use crate::probe::Prober;
use crate::report::Report;

pub const UNKNOWN: &str = "Unknown";

/// Name of a displayed fact, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactName {
    User,
    Os,
    Model,
    Cpu,
    Gpu,
    Packages,
    Shell,
    Memory,
    Uptime,
}

impl FactName {
    pub const ALL: [FactName; 9] = [
        FactName::User,
        FactName::Os,
        FactName::Model,
        FactName::Cpu,
        FactName::Gpu,
        FactName::Packages,
        FactName::Shell,
        FactName::Memory,
        FactName::Uptime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FactName::User => "user",
            FactName::Os => "os",
            FactName::Model => "model",
            FactName::Cpu => "cpu",
            FactName::Gpu => "gpu",
            FactName::Packages => "packages",
            FactName::Shell => "shell",
            FactName::Memory => "memory",
            FactName::Uptime => "uptime",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.label() == label)
    }
}

impl fmt::Display for FactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One resolved, colored line of the report
#[derive(Debug, Clone)]
pub struct HostFact {
    pub name: FactName,
    pub value: String,
    pub color: Color,
}

/// Everything a resolver may consult
pub struct ResolveContext<'a> {
    pub prober: &'a dyn Prober,
    pub platform: &'a Platform,
    pub model: &'a ModelConfig,
    /// Remote identifier lookup, present only when configured and available
    pub lookup: Option<&'a dyn DeviceLookup>,
}

type Resolver = fn(&ResolveContext<'_>) -> Result<String>;

fn resolver_for(name: FactName) -> Resolver {
    match name {
        FactName::User => session::resolve_user,
        FactName::Os => os::resolve,
        FactName::Model => model::resolve,
        FactName::Cpu => cpu::resolve,
        FactName::Gpu => gpu::resolve,
        FactName::Packages => packages::resolve,
        FactName::Shell => session::resolve_shell,
        FactName::Memory => memory::resolve,
        FactName::Uptime => uptime::resolve,
    }
}

/// Resolve one fact, degrading to `"Unknown"` on any failure
pub fn resolve(name: FactName, ctx: &ResolveContext<'_>) -> String {
    match resolver_for(name)(ctx) {
        Ok(value) if !value.trim().is_empty() => {
            debug!(fact = %name, %value, "resolved");
            value.trim().to_string()
        }
        Ok(_) => {
            debug!(fact = %name, "resolver produced an empty value");
            UNKNOWN.to_string()
        }
        Err(err) => {
            warn!(fact = %name, "falling back to Unknown: {:#}", err);
            UNKNOWN.to_string()
        }
    }
}

/// Resolve every field of `report`, strictly in its order
pub fn collect(ctx: &ResolveContext<'_>, report: &Report) -> Vec<HostFact> {
    report
        .fields()
        .iter()
        .map(|field| HostFact {
            name: field.name,
            value: resolve(field.name, ctx),
            color: field.color,
        })
        .collect()
}

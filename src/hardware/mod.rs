//! Hardware facts
//!
//! Resolves the machine model, CPU, GPU, and memory usage using sysinfo,
//! sysfs/devicetree files, and platform tools (`lspci`, `sysctl`,
//! `system_profiler`).

pub mod cpu;
pub mod gpu;
pub mod memory;
pub mod model;
mod model_table;

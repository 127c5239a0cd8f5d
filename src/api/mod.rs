//! API module
//!
//! HTTP client for the device-identifier lookup service.

mod client;

pub use client::{DeviceLookup, LookupClient, LookupError};

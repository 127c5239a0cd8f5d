//! Operating system and session facts
//!
//! OS identity, installed package counts, the login user and shell, and
//! uptime.

pub mod os;
pub mod packages;
pub mod session;
pub mod uptime;

//! Time since boot

use anyhow::{bail, Result};
use chrono::Utc;
use sysinfo::System;

use crate::facts::ResolveContext;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

pub fn resolve(_ctx: &ResolveContext<'_>) -> Result<String> {
    let boot_time = System::boot_time();
    if boot_time == 0 {
        bail!("boot time not available");
    }

    let now = Utc::now().timestamp().max(0) as u64;
    Ok(format_uptime(now.saturating_sub(boot_time)))
}

/// `H:MM:SS`, prefixed with `N day(s), ` once a day has passed
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / SECONDS_PER_DAY;
    let rest = seconds % SECONDS_PER_DAY;
    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);

    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_under_a_day() {
        assert_eq!(format_uptime(0), "0:00:00");
        assert_eq!(format_uptime(59), "0:00:59");
        assert_eq!(format_uptime(3 * 3600 + 7 * 60 + 5), "3:07:05");
        assert_eq!(format_uptime(SECONDS_PER_DAY - 1), "23:59:59");
    }

    #[test]
    fn test_format_with_days() {
        assert_eq!(format_uptime(SECONDS_PER_DAY), "1 day, 0:00:00");
        assert_eq!(
            format_uptime(3 * SECONDS_PER_DAY + 4 * 3600 + 5),
            "3 days, 4:00:05"
        );
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::time::Duration;

/// Default pump tick
pub const DEFAULT_PUMP_INTERVAL: Duration = Duration::from_secs(60);

/// Default delay before the startup-class run
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_secs(1);

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.trim().parse::<u64>().ok()).map(Duration::from_millis)
}

/// Pump tick (`BSCHED_PUMP_INTERVAL_MS`, default 60s). Zero is ignored.
pub fn pump_interval() -> Duration {
    duration_ms("BSCHED_PUMP_INTERVAL_MS")
        .filter(|d| !d.is_zero())
        .unwrap_or(DEFAULT_PUMP_INTERVAL)
}

/// Delay before the startup-class run (`BSCHED_STARTUP_DELAY_MS`, default 1s).
pub fn startup_delay() -> Duration {
    duration_ms("BSCHED_STARTUP_DELAY_MS").unwrap_or(DEFAULT_STARTUP_DELAY)
}

/// Fallback filename prefix (`BSCHED_DEFAULT_INSTANCE_NAME`, default `octoprint`).
pub fn default_instance_name() -> String {
    std::env::var("BSCHED_DEFAULT_INSTANCE_NAME")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| bsched_core::DEFAULT_INSTANCE_NAME.to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

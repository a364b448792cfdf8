// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
fn defaults_match_shipped_values() {
    let config = RuntimeConfig::default();
    assert_eq!(config.pump_interval, Duration::from_secs(60));
    assert_eq!(config.startup_delay, Duration::from_secs(1));
    assert_eq!(config.default_instance_name, "octoprint");
}

#[test]
fn setters_override_fields() {
    let config = RuntimeConfig::default()
        .pump_interval(Duration::from_millis(10))
        .startup_delay(Duration::ZERO)
        .default_instance_name("lab");
    assert_eq!(config.pump_interval, Duration::from_millis(10));
    assert_eq!(config.startup_delay, Duration::ZERO);
    assert_eq!(config.default_instance_name, "lab");
}

#[test]
#[serial]
fn from_env_without_overrides_equals_default() {
    let saved: Vec<_> = ["BSCHED_PUMP_INTERVAL_MS", "BSCHED_STARTUP_DELAY_MS", "BSCHED_DEFAULT_INSTANCE_NAME"]
        .into_iter()
        .map(|k| (k, std::env::var(k).ok()))
        .collect();
    for (k, _) in &saved {
        std::env::remove_var(k);
    }

    assert_eq!(RuntimeConfig::from_env(), RuntimeConfig::default());

    for (k, v) in saved {
        if let Some(v) = v {
            std::env::set_var(k, v);
        }
    }
}

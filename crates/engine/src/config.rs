// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime tuning knobs.

use crate::env;
use std::time::Duration;

/// Timing and naming configuration for a [`Runtime`](crate::Runtime).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// How often armed triggers are checked. Bounds schedule precision.
    pub pump_interval: Duration,
    /// Delay between `Startup` and the startup-class run.
    pub startup_delay: Duration,
    /// Filename prefix when the store has no instance name.
    pub default_instance_name: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pump_interval: env::DEFAULT_PUMP_INTERVAL,
            startup_delay: env::DEFAULT_STARTUP_DELAY,
            default_instance_name: bsched_core::DEFAULT_INSTANCE_NAME.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `BSCHED_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            pump_interval: env::pump_interval(),
            startup_delay: env::startup_delay(),
            default_instance_name: env::default_instance_name(),
        }
    }

    bsched_core::setters! {
        into {
            default_instance_name: String,
        }
        set {
            pump_interval: Duration,
            startup_delay: Duration,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! Behavioral specifications for the backup scheduler.
//!
//! Each module drives the public engine API against fake host adapters.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/deferral.rs"]
mod deferral;
#[path = "specs/retention.rs"]
mod retention;
#[path = "specs/scheduling.rs"]
mod scheduling;
#[path = "specs/settings.rs"]
mod settings;

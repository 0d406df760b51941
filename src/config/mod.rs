//! Configuration loading and management for the roster engine.
//!
//! This module provides functionality to load the scheduling policy from
//! a YAML file: the reconciliation tolerance and the double-booking rule.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::PolicyLoader;
//!
//! let loader = PolicyLoader::load("./config/policy.yaml").unwrap();
//! println!("Tolerance: {} minutes", loader.policy().tolerance_minutes);
//! ```

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{OverlapPolicy, SchedulePolicy};

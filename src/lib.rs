//! Workforce scheduling and timesheet reconciliation engine
//!
//! This crate rosters staff onto a half-hour scheduling grid, reconciles
//! submitted timesheets against the published schedule, and reports
//! projected and approved labor costs per business.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod store;

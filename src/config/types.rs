//! Configuration types for scheduling policy.
//!
//! This module contains the strongly-typed policy structure that is
//! deserialized from the YAML policy file.

use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_TOLERANCE_MINUTES;

/// How the store treats a double-booked staff member at shift creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Create the shift anyway; conflicts surface through the overlap query.
    #[default]
    Warn,
    /// Fail creation when the staff member is already booked.
    Reject,
}

/// Scheduling and reconciliation policy.
///
/// Loaded from `policy.yaml`; every field has a default so the engine
/// also runs without a file.
///
/// # Example
///
/// ```
/// use roster_engine::config::{OverlapPolicy, SchedulePolicy};
///
/// let policy = SchedulePolicy::default();
/// assert_eq!(policy.tolerance_minutes, 15);
/// assert_eq!(policy.overlap, OverlapPolicy::Warn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePolicy {
    /// Reconciliation tolerance in minutes. The boundary is inclusive.
    #[serde(default = "default_tolerance_minutes")]
    pub tolerance_minutes: i64,
    /// Double-booking rule applied when shifts are created.
    #[serde(default)]
    pub overlap: OverlapPolicy,
}

fn default_tolerance_minutes() -> i64 {
    DEFAULT_TOLERANCE_MINUTES
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            overlap: OverlapPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = SchedulePolicy::default();

        assert_eq!(policy.tolerance_minutes, 15);
        assert_eq!(policy.overlap, OverlapPolicy::Warn);
    }

    #[test]
    fn test_deserialize_full_policy() {
        let yaml = "tolerance_minutes: 30\noverlap: reject\n";

        let policy: SchedulePolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.tolerance_minutes, 30);
        assert_eq!(policy.overlap, OverlapPolicy::Reject);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let yaml = "overlap: reject\n";

        let policy: SchedulePolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.tolerance_minutes, 15);
        assert_eq!(policy.overlap, OverlapPolicy::Reject);

        let policy: SchedulePolicy = serde_yaml::from_str("{}").unwrap();
        assert_eq!(policy, SchedulePolicy::default());
    }

    #[test]
    fn test_overlap_policy_snake_case() {
        assert_eq!(
            serde_yaml::from_str::<OverlapPolicy>("warn").unwrap(),
            OverlapPolicy::Warn
        );
        assert_eq!(
            serde_yaml::from_str::<OverlapPolicy>("reject").unwrap(),
            OverlapPolicy::Reject
        );
    }
}

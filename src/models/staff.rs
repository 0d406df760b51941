//! Staff member model and roster inputs.
//!
//! This module defines the StaffMember struct for representing workers
//! on a business's roster, plus the input types used to create and
//! patch them through the schedule store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A worker on a business's roster.
///
/// The hourly rate carries currency-minor-unit precision (two decimal
/// places). Once a staff member is referenced by any shift, every field
/// except `hourly_rate` is frozen; rate changes flow into live projected
/// cost but never into figures frozen on approved timesheets.
///
/// # Example
///
/// ```
/// use roster_engine::models::StaffMember;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let staff = StaffMember {
///     id: Uuid::new_v4(),
///     name: "Priya Sharma".to_string(),
///     role: "Barista".to_string(),
///     hourly_rate: Decimal::new(1200, 2), // 12.00
///     color: "#0ea5e9".to_string(),
///     preferred_hours: Decimal::new(30, 0),
/// };
/// assert_eq!(staff.hourly_rate, Decimal::new(1200, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Unique identifier for the staff member.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Default role label (e.g., "Barista", "Supervisor").
    pub role: String,
    /// Hourly pay rate in currency minor-unit precision.
    pub hourly_rate: Decimal,
    /// Display color for schedule rendering (hex).
    pub color: String,
    /// Preferred weekly hours. A target for schedulers, never enforced.
    pub preferred_hours: Decimal,
}

/// Input for creating a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStaff {
    /// Display name.
    pub name: String,
    /// Default role label.
    pub role: String,
    /// Hourly pay rate.
    pub hourly_rate: Decimal,
    /// Display color (hex).
    pub color: String,
    /// Preferred weekly hours target.
    #[serde(default)]
    pub preferred_hours: Decimal,
}

/// A partial update to a staff member.
///
/// Only `hourly_rate` is accepted once the staff member is referenced by
/// a shift; the store rejects other changes with `StaffInUse`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffPatch {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New default role label.
    #[serde(default)]
    pub role: Option<String>,
    /// New hourly pay rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// New display color.
    #[serde(default)]
    pub color: Option<String>,
    /// New preferred weekly hours target.
    #[serde(default)]
    pub preferred_hours: Option<Decimal>,
}

impl StaffPatch {
    /// Returns true if the patch touches anything other than the hourly rate.
    pub fn touches_frozen_fields(&self) -> bool {
        self.name.is_some()
            || self.role.is_some()
            || self.color.is_some()
            || self.preferred_hours.is_some()
    }
}

//! In-memory schedule store.
//!
//! This module provides the [`ScheduleStore`], the engine's stateful
//! core: per-business rosters, shifts, and timesheets behind a
//! per-business lock. The registry itself sits behind a briefly-held
//! `RwLock`, so operations on different businesses never block each
//! other while everything touching one business serializes on its own
//! mutex. No I/O happens inside any critical section.

mod reports;
mod shifts;
mod timesheets;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use uuid::Uuid;

use crate::config::SchedulePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{NewStaff, Shift, StaffMember, StaffPatch, Timesheet};

/// All scheduling state belonging to one business.
#[derive(Debug, Default)]
struct BusinessSchedule {
    staff: HashMap<Uuid, StaffMember>,
    shifts: HashMap<Uuid, Shift>,
    timesheets: HashMap<Uuid, Timesheet>,
    timesheet_by_shift: HashMap<Uuid, Uuid>,
}

impl BusinessSchedule {
    /// Looks up the current hourly rate for a staff member.
    fn rate_of(&self, staff_id: Uuid) -> rust_decimal::Decimal {
        self.staff
            .get(&staff_id)
            .map(|staff| staff.hourly_rate)
            .unwrap_or_default()
    }

    /// Looks up the display name for a staff member.
    fn name_of(&self, staff_id: Uuid) -> String {
        self.staff
            .get(&staff_id)
            .map(|staff| staff.name.clone())
            .unwrap_or_default()
    }
}

/// Thread-safe registry of per-business schedules.
///
/// Every mutating and reading operation is keyed by business id;
/// businesses are created lazily on first write. All operations are
/// bounded: validate, mutate, return.
///
/// # Example
///
/// ```
/// use roster_engine::config::SchedulePolicy;
/// use roster_engine::models::NewStaff;
/// use roster_engine::store::ScheduleStore;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let store = ScheduleStore::new(SchedulePolicy::default());
/// let business_id = Uuid::new_v4();
///
/// let staff = store.create_staff(
///     business_id,
///     NewStaff {
///         name: "Priya Sharma".to_string(),
///         role: "Barista".to_string(),
///         hourly_rate: Decimal::new(1200, 2),
///         color: "#0ea5e9".to_string(),
///         preferred_hours: Decimal::new(30, 0),
///     },
/// );
/// assert_eq!(store.list_staff(business_id), vec![staff]);
/// ```
#[derive(Debug)]
pub struct ScheduleStore {
    policy: SchedulePolicy,
    businesses: RwLock<HashMap<Uuid, Arc<Mutex<BusinessSchedule>>>>,
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new(SchedulePolicy::default())
    }
}

impl ScheduleStore {
    /// Creates an empty store governed by the given policy.
    pub fn new(policy: SchedulePolicy) -> Self {
        Self {
            policy,
            businesses: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the policy the store was constructed with.
    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// Returns the schedule entry for a business, creating it on first use.
    ///
    /// Every mutation leaves the schedule consistent, so a lock poisoned
    /// by a panicking thread is still safe to recover and reuse.
    fn business(&self, business_id: Uuid) -> Arc<Mutex<BusinessSchedule>> {
        {
            let registry = self.businesses.read().unwrap_or_else(|e| e.into_inner());
            if let Some(entry) = registry.get(&business_id) {
                return Arc::clone(entry);
            }
        }

        let mut registry = self.businesses.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(registry.entry(business_id).or_default())
    }

    /// Returns the schedule entry for a business if it exists.
    ///
    /// Read paths use this so queries against unknown businesses do not
    /// grow the registry.
    fn existing_business(&self, business_id: Uuid) -> Option<Arc<Mutex<BusinessSchedule>>> {
        let registry = self.businesses.read().unwrap_or_else(|e| e.into_inner());
        registry.get(&business_id).map(Arc::clone)
    }

    fn lock_schedule(entry: &Arc<Mutex<BusinessSchedule>>) -> MutexGuard<'_, BusinessSchedule> {
        entry.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds a staff member to a business's roster.
    pub fn create_staff(&self, business_id: Uuid, input: NewStaff) -> StaffMember {
        let entry = self.business(business_id);
        let mut schedule = Self::lock_schedule(&entry);

        let staff = StaffMember {
            id: Uuid::new_v4(),
            name: input.name,
            role: input.role,
            hourly_rate: input.hourly_rate,
            color: input.color,
            preferred_hours: input.preferred_hours,
        };

        schedule.staff.insert(staff.id, staff.clone());
        staff
    }

    /// Applies a partial update to a staff member.
    ///
    /// Once any shift references the staff member, only the hourly rate
    /// may change; other field edits fail with [`EngineError::StaffInUse`].
    /// Rate changes flow into live projected costs but never into figures
    /// already frozen on approved timesheets.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StaffNotFound`] if the staff member does not
    /// exist within the business, or [`EngineError::StaffInUse`] when a
    /// frozen field is patched on a referenced staff member.
    pub fn update_staff(
        &self,
        business_id: Uuid,
        staff_id: Uuid,
        patch: StaffPatch,
    ) -> EngineResult<StaffMember> {
        let entry = self.business(business_id);
        let mut schedule = Self::lock_schedule(&entry);

        let referenced = schedule
            .shifts
            .values()
            .any(|shift| shift.staff_id == staff_id);

        let staff = schedule
            .staff
            .get_mut(&staff_id)
            .ok_or(EngineError::StaffNotFound { staff_id })?;

        if referenced && patch.touches_frozen_fields() {
            return Err(EngineError::StaffInUse { staff_id });
        }

        if let Some(name) = patch.name {
            staff.name = name;
        }
        if let Some(role) = patch.role {
            staff.role = role;
        }
        if let Some(hourly_rate) = patch.hourly_rate {
            staff.hourly_rate = hourly_rate;
        }
        if let Some(color) = patch.color {
            staff.color = color;
        }
        if let Some(preferred_hours) = patch.preferred_hours {
            staff.preferred_hours = preferred_hours;
        }

        Ok(staff.clone())
    }

    /// Lists a business's roster ordered by staff name.
    pub fn list_staff(&self, business_id: Uuid) -> Vec<StaffMember> {
        let Some(entry) = self.existing_business(business_id) else {
            return Vec::new();
        };
        let schedule = Self::lock_schedule(&entry);

        let mut roster: Vec<StaffMember> = schedule.staff.values().cloned().collect();
        roster.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        roster
    }
}

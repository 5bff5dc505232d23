//! Weekly slot registry

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Weekday;
use roster_domain::utils::dates::weekday_index;
use roster_domain::{slot_id, Result, SlotTime, TimeSlot};
use tracing::{debug, info};

use crate::calendar::ports::SlotRepository;

/// Partial update of a slot. `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotUpdate {
    pub min_staff: Option<u32>,
    pub max_staff: Option<u32>,
    pub active: Option<bool>,
}

/// Administrative operations on the recurring slot list.
///
/// Calendars are not rebuilt here; they pick the change up the next time a
/// month is read.
pub struct SlotRegistry {
    repository: Arc<dyn SlotRepository>,
}

impl SlotRegistry {
    pub fn new(repository: Arc<dyn SlotRepository>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<TimeSlot>> {
        self.repository.load_slots()
    }

    /// Slots grouped by weekday (Sunday first), each group sorted by time.
    pub fn by_weekday(&self) -> Result<BTreeMap<u8, Vec<TimeSlot>>> {
        let mut groups: BTreeMap<u8, Vec<TimeSlot>> = BTreeMap::new();
        for slot in self.repository.load_slots()? {
            groups.entry(weekday_index(slot.weekday)).or_default().push(slot);
        }
        for slots in groups.values_mut() {
            slots.sort_by_key(|s| s.time);
        }
        Ok(groups)
    }

    /// Add an active slot at a free-form time.
    ///
    /// Returns `false` without saving when `(weekday, time)` is taken.
    pub fn add(
        &self,
        weekday: Weekday,
        raw_time: &str,
        min_staff: u32,
        max_staff: u32,
    ) -> Result<bool> {
        let time = SlotTime::normalize(raw_time);
        let mut slots = self.repository.load_slots()?;
        if slots.iter().any(|s| s.occupies(weekday, time)) {
            debug!(id = %slot_id(weekday, time), "Slot already exists");
            return Ok(false);
        }

        let slot = TimeSlot::new(weekday, time, min_staff, max_staff);
        info!(id = %slot.id(), min = slot.min_staff, max = slot.max_staff, "Adding slot");
        slots.push(slot);
        self.repository.save_slots(&slots)?;
        Ok(true)
    }

    /// Remove the slot with registry id `id` (e.g. `"1-06:30"`).
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut slots = self.repository.load_slots()?;
        let before = slots.len();
        slots.retain(|s| s.id() != id);
        if slots.len() == before {
            return Ok(false);
        }
        self.repository.save_slots(&slots)?;
        info!(id, "Removed slot");
        Ok(true)
    }

    /// Apply `update` to slot `id`, keeping `max_staff >= min_staff`.
    pub fn update(&self, id: &str, update: SlotUpdate) -> Result<Option<TimeSlot>> {
        let mut slots = self.repository.load_slots()?;
        let Some(slot) = slots.iter_mut().find(|s| s.id() == id) else { return Ok(None) };

        if let Some(min) = update.min_staff {
            slot.min_staff = min;
        }
        if let Some(max) = update.max_staff {
            slot.max_staff = max;
        }
        if let Some(active) = update.active {
            slot.active = active;
        }
        slot.clamp_staffing();
        let updated = slot.clone();

        self.repository.save_slots(&slots)?;
        debug!(
            id,
            min = updated.min_staff,
            max = updated.max_staff,
            active = updated.active,
            "Updated slot"
        );
        Ok(Some(updated))
    }

    /// Replace the whole list with the standing schedule.
    pub fn reset_to_defaults(&self) -> Result<Vec<TimeSlot>> {
        let slots = TimeSlot::default_seed();
        self.repository.save_slots(&slots)?;
        info!(slots = slots.len(), "Reset slots to the default schedule");
        Ok(slots)
    }
}

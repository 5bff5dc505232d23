//! Key-value implementations of the slot and extra event registry ports.

use std::sync::Arc;

use roster_core::{ExtraEventRepository, SlotRepository};
use roster_domain::{ExtraEvent, ExtraEventsByMonth, Result, TimeSlot};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::storage::records::{self, EXTRAS_KEY, SLOTS_KEY};
use crate::storage::KvStore;

/// Slot registry stored as one ordered list.
pub struct KvSlotRepository {
    store: Arc<dyn KvStore>,
}

impl KvSlotRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

impl SlotRepository for KvSlotRepository {
    #[instrument(skip(self))]
    fn load_slots(&self) -> Result<Vec<TimeSlot>> {
        let (mut slots, dropped) = records::load_list::<TimeSlot>(self.store.as_ref(), SLOTS_KEY)?;

        let mut clamped = 0;
        for slot in &mut slots {
            let before = slot.max_staff;
            slot.clamp_staffing();
            if slot.max_staff != before {
                clamped += 1;
            }
        }
        if dropped > 0 || clamped > 0 {
            warn!(dropped, clamped, "Repaired slot registry on load");
        }
        Ok(slots)
    }

    #[instrument(skip(self, slots), fields(count = slots.len()))]
    fn save_slots(&self, slots: &[TimeSlot]) -> Result<()> {
        records::save_record(self.store.as_ref(), SLOTS_KEY, slots)
    }
}

/// Extra events stored as `"YYYY-MM"` → list.
pub struct KvExtraEventRepository {
    store: Arc<dyn KvStore>,
}

impl KvExtraEventRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

impl ExtraEventRepository for KvExtraEventRepository {
    /// Events are re-filed under the month of their own date and staffing
    /// bounds are clamped; events that do not decode are dropped.
    #[instrument(skip(self))]
    fn load_extras(&self) -> Result<ExtraEventsByMonth> {
        let Some(value) = records::load_value(self.store.as_ref(), EXTRAS_KEY)? else {
            return Ok(ExtraEventsByMonth::new());
        };
        let Value::Object(months) = value else {
            warn!(key = EXTRAS_KEY, "Expected a month map; record replaced by default");
            return Ok(ExtraEventsByMonth::new());
        };

        let mut grouped = ExtraEventsByMonth::new();
        let mut dropped = 0;
        let mut repaired = 0;
        for (filed_under, list) in months {
            let Value::Array(items) = list else {
                warn!(month = %filed_under, "Expected a list of extras; month dropped");
                continue;
            };
            let (events, bad) = records::decode_elements::<ExtraEvent>(EXTRAS_KEY, items);
            dropped += bad;
            for mut event in events {
                if event.max_staff < event.min_staff {
                    event.max_staff = event.min_staff;
                    repaired += 1;
                }
                let month = event.year_month();
                if month.to_string() != filed_under {
                    repaired += 1;
                }
                grouped.entry(month).or_default().push(event);
            }
        }
        if dropped > 0 || repaired > 0 {
            warn!(dropped, repaired, "Repaired extra event registry on load");
        }
        Ok(grouped)
    }

    #[instrument(skip(self, extras), fields(months = extras.len()))]
    fn save_extras(&self, extras: &ExtraEventsByMonth) -> Result<()> {
        let non_empty: ExtraEventsByMonth = extras
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(month, list)| (*month, list.clone()))
            .collect();
        records::save_record(self.store.as_ref(), EXTRAS_KEY, &non_empty)
    }
}

//! Key-value implementation of the availability port.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use roster_core::AvailabilityRepository;
use roster_domain::{AvailabilityBook, Result, YearMonth};
use serde_json::{Map, Value};
use tracing::{instrument, warn};

use crate::storage::records::{self, AVAILABILITY_KEY};
use crate::storage::KvStore;

/// Availability stored as `userId → "YYYY-MM" → ISO date → eventKey → true`.
pub struct KvAvailabilityRepository {
    store: Arc<dyn KvStore>,
}

impl KvAvailabilityRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

/// Flags of one date, by key.
type CleanFlags = Map<String, Value>;

/// Keep the entries that fit the record shape: a valid month holding dates
/// of that month, each mapping keys to booleans. Month and date keys are
/// rewritten in their canonical spelling; entries that then share a key are
/// merged, a flag being true if any copy is. Returns the cleaned document
/// and the number of entries discarded.
fn clean_document(value: Value) -> (Value, usize) {
    let mut discarded = 0;
    let Value::Object(users) = value else { return (Value::Object(Map::new()), 1) };

    let mut clean_users = Map::new();
    for (user, months) in users {
        let Value::Object(months) = months else {
            discarded += 1;
            continue;
        };
        let mut clean_months: BTreeMap<YearMonth, BTreeMap<NaiveDate, CleanFlags>> =
            BTreeMap::new();
        for (month_text, dates) in months {
            let (Ok(month), Value::Object(dates)) = (month_text.parse::<YearMonth>(), dates) else {
                discarded += 1;
                continue;
            };
            let clean_dates = clean_months.entry(month).or_default();
            for (date_text, flags) in dates {
                let date = NaiveDate::parse_from_str(date_text.trim(), "%Y-%m-%d")
                    .ok()
                    .filter(|date| month.contains(*date));
                let (Some(date), Value::Object(flags)) = (date, flags) else {
                    discarded += 1;
                    continue;
                };
                let merged = clean_dates.entry(date).or_default();
                for (key, flag) in flags {
                    let Value::Bool(flag) = flag else {
                        discarded += 1;
                        continue;
                    };
                    let kept = merged.get(&key).and_then(Value::as_bool).unwrap_or(false);
                    merged.insert(key, Value::Bool(kept || flag));
                }
            }
        }
        clean_users.insert(user, months_to_value(clean_months));
    }
    (Value::Object(clean_users), discarded)
}

fn months_to_value(months: BTreeMap<YearMonth, BTreeMap<NaiveDate, CleanFlags>>) -> Value {
    months
        .into_iter()
        .map(|(month, dates)| {
            let dates: Map<String, Value> = dates
                .into_iter()
                .map(|(date, flags)| (date.to_string(), Value::Object(flags)))
                .collect();
            (month.to_string(), Value::Object(dates))
        })
        .collect::<Map<String, Value>>()
        .into()
}

impl AvailabilityRepository for KvAvailabilityRepository {
    /// Malformed entries and explicit `false` flags are dropped on load.
    #[instrument(skip(self))]
    fn load_availability(&self) -> Result<AvailabilityBook> {
        let Some(value) = records::load_value(self.store.as_ref(), AVAILABILITY_KEY)? else {
            return Ok(AvailabilityBook::new());
        };
        let (clean, discarded) = clean_document(value);
        let mut book: AvailabilityBook = match serde_json::from_value(clean) {
            Ok(book) => book,
            Err(e) => {
                warn!(error = %e, "Malformed availability record replaced by default");
                return Ok(AvailabilityBook::new());
            }
        };
        let stripped = book.strip_false();
        if discarded > 0 {
            warn!(discarded, "Dropped malformed availability entries on load");
        }
        if stripped > 0 {
            tracing::debug!(stripped, "Dropped false availability flags on load");
        }
        Ok(book)
    }

    #[instrument(skip(self, book))]
    fn save_availability(&self, book: &AvailabilityBook) -> Result<()> {
        records::save_record(self.store.as_ref(), AVAILABILITY_KEY, book)
    }
}

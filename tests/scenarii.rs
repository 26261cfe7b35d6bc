//! Shared building blocks for the admin editing scenarios
//!
//! These helpers seed an in-process store the way the hosted collection
//! would look (including legacy wire shapes), so every test drives the
//! same code paths the live system does.

use std::collections::BTreeMap;

use wall_planner::event::{EventId, EventMap, EventRecord, Title};
use wall_planner::localization::Language;
use wall_planner::store::EventStore;
use wall_planner::MemoryStore;

/// A session record with a plain, single-language title
pub fn plain_record(date: &str, start: &str, end: &str, title: &str) -> EventRecord {
    EventRecord {
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        title: Title::Plain(title.to_string()),
        ..EventRecord::default()
    }
}

/// A title carrying all three language variants
pub fn localized_title(en: &str, fr: &str, pt: &str) -> Title {
    let mut variants = BTreeMap::new();
    variants.insert(Language::En, en.to_string());
    variants.insert(Language::Fr, fr.to_string());
    variants.insert(Language::Pt, pt.to_string());
    Title::Localized(variants)
}

/// A store already containing the given entries under fixed ids
pub fn seeded_store(entries: Vec<(&str, EventRecord)>) -> MemoryStore {
    let events: EventMap = entries
        .into_iter()
        .map(|(id, record)| (EventId::from(id), record))
        .collect();
    MemoryStore::with_initial(events)
}

/// The collection as the store currently holds it
pub async fn stored_collection(store: &MemoryStore) -> EventMap {
    store
        .subscribe()
        .await
        .expect("the in-process store is always reachable")
        .current()
}

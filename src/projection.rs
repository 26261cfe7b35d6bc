//! Derived views of the raw event collection
//!
//! Both projections are pure functions of one snapshot: they keep no state
//! and are recomputed from scratch every time the store delivers a new
//! collection, so a missed or reordered notification can never make them
//! drift from the source of truth.

use crate::event::{Event, EventMap};

/// The published events of one calendar day, in chronological order
#[derive(Clone, Debug, PartialEq)]
pub struct DaySchedule {
    date: String,
    events: Vec<Event>,
}

impl DaySchedule {
    /// The ISO `YYYY-MM-DD` date shared by every event in this group
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The events of this day, ordered by start time
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

/// The full admin listing: every event, drafts included, ordered
/// chronologically by `(date, startTime)`.
pub fn project_all(events: &EventMap) -> Vec<Event> {
    let mut list = flatten(events);
    sort_chronologically(&mut list);
    list
}

/// The public view: published events only, ordered chronologically and
/// grouped by date. Group order is ascending by date string, which is
/// chronological for zero-padded ISO dates.
pub fn project_published(events: &EventMap) -> Vec<DaySchedule> {
    let mut list = flatten(events);
    list.retain(|event| event.published());
    sort_chronologically(&mut list);

    let mut days: Vec<DaySchedule> = Vec::new();
    for event in list {
        match days.last_mut() {
            Some(day) if day.date == event.date() => day.events.push(event),
            _ => days.push(DaySchedule {
                date: event.date().to_string(),
                events: vec![event],
            }),
        }
    }
    days
}

/// Turn the id->record map into a list of events, injecting the id into
/// each entry.
///
/// Records missing their sort key (empty `date` or `startTime`) are
/// dropped here: a half-written entry must not crash either view, and
/// must not flash at an arbitrary position until someone completes it.
fn flatten(events: &EventMap) -> Vec<Event> {
    events
        .iter()
        .filter(|(id, record)| {
            if record.date.is_empty() || record.start_time.is_empty() {
                log::warn!("Event {} has no date or start time, leaving it out", id);
                false
            } else {
                true
            }
        })
        .map(|(id, record)| Event::new(id.clone(), record.clone()))
        .collect()
}

/// Ascending by `(date, startTime)`, plain string comparison.
///
/// `sort_by` is stable, so events tied on both keys keep their flatten
/// order and the listing does not jitter across re-renders.
fn sort_chronologically(list: &mut Vec<Event>) {
    list.sort_by(|a, b| {
        a.date()
            .cmp(b.date())
            .then_with(|| a.start_time().cmp(b.start_time()))
    });
}

//! Some utility functions

use crate::event::{Event, EventKind, EventMap};
use crate::localization::{translate, Language};
use crate::projection;

/// A debug utility that pretty-prints the admin listing of a snapshot
pub fn print_admin_listing(events: &EventMap, language: Language) {
    let listing = projection::project_all(events);
    println!("{} ({})", translate(language, "scheduledEvents"), listing.len());

    if listing.is_empty() {
        println!("    {}", translate(language, "noEvents"));
        return;
    }
    for event in &listing {
        print_event(event, language);
    }
}

/// A debug utility that pretty-prints one event
pub fn print_event(event: &Event, language: Language) {
    let published = if event.published() { "✓" } else { "·" };
    let kind = match event.kind() {
        EventKind::Session => "session",
        EventKind::Break => "break  ",
    };
    println!(
        "    {} {} {} - {} [{}]\t{}",
        published,
        event.date(),
        event.start_time(),
        event.end_time(),
        kind,
        event.title().localize(language)
    );
}

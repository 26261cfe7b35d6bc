//! The public timeline: the published schedule, grouped by day
//!
//! The presenter owns a live subscription and re-renders the whole
//! timeline from scratch on every snapshot. At the expected collection
//! sizes (tens of events) a full re-render is cheaper than keeping any
//! incremental state that could drift.

use chrono::NaiveDate;

use crate::event::EventKind;
use crate::localization::{translate, Language};
use crate::projection::{self, DaySchedule};
use crate::store::{EventStore, StoreError, Subscription};

/// The public, read-only view over an event store
pub struct TimelinePresenter {
    subscription: Subscription,
    language: Language,
}

impl TimelinePresenter {
    /// Subscribe to the store and present it in the given language.
    ///
    /// Until this resolves, an embedder shows
    /// [`loading_message`](Self::loading_message); if it fails with
    /// [`StoreError::Unavailable`] there is nothing to retry here, the
    /// caller decides whether to try again.
    pub async fn open<S: EventStore>(store: &S, language: Language) -> Result<Self, StoreError> {
        let subscription = store.subscribe().await?;
        Ok(Self {
            subscription,
            language,
        })
    }

    /// What to show while the subscription is being established
    pub fn loading_message(language: Language) -> &'static str {
        translate(language, "loading")
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the display language. Takes effect on the next render.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// The published view of the latest snapshot
    pub fn schedule(&self) -> Vec<DaySchedule> {
        projection::project_published(&self.subscription.current())
    }

    /// Render the latest snapshot
    pub fn render(&self) -> String {
        render_timeline(&self.schedule(), self.language)
    }

    /// Wait for the next committed mutation, then render the new snapshot
    pub async fn refreshed(&mut self) -> Result<String, StoreError> {
        let snapshot = self.subscription.changed().await?;
        Ok(render_timeline(
            &projection::project_published(&snapshot),
            self.language,
        ))
    }
}

/// Render a published view as text, one date group at a time.
///
/// An empty view renders the localized empty-state message rather than an
/// error: the public timeline never surfaces raw failures.
pub fn render_timeline(days: &[DaySchedule], language: Language) -> String {
    if days.is_empty() {
        return translate(language, "noEventsScheduled").to_string();
    }

    let mut out = String::new();
    for day in days {
        out.push_str(&date_header(day.date(), language));
        out.push('\n');
        for event in day.events() {
            out.push_str(&format!(
                "  {} - {}  {}\n",
                event.start_time(),
                event.end_time(),
                event.title().localize(language)
            ));
            match event.kind() {
                EventKind::Break => {
                    out.push_str(&format!("      [{}]\n", translate(language, "breakBadge")));
                }
                EventKind::Session => {
                    if !event.moderator().is_empty() {
                        out.push_str(&format!(
                            "      {}: {}\n",
                            translate(language, "moderator"),
                            event.moderator()
                        ));
                    }
                    if !event.speakers().is_empty() {
                        out.push_str(&format!(
                            "      {}: {}\n",
                            translate(language, "speakers"),
                            event.speakers()
                        ));
                    }
                }
            }
        }
    }
    out
}

/// The long localized date heading of one group, e.g.
/// "mercredi 1 octobre 2025".
///
/// A date string that does not parse is shown as-is: a malformed date
/// must not take the timeline down.
fn date_header(date: &str, language: Language) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(day) => day
            .format_localized("%A %-d %B %Y", language.chrono_locale())
            .to_string(),
        Err(_) => date.to_string(),
    }
}

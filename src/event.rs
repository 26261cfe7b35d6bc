//! Agenda entries (sessions and breaks) and their wire representation

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

use crate::localization::Language;

/// The identifier the store assigns to an event on creation.
///
/// It is opaque, unique within the collection, and stable for the lifetime
/// of the entry.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId {
    content: String,
}

impl EventId {
    /// Generate a random EventId, the way an in-process store assigns keys.
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for EventId {
    fn from(content: String) -> Self {
        Self { content }
    }
}

impl From<&str> for EventId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// The kind of an agenda entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A talk with a moderator and speakers
    Session,
    /// Lunch, coffee, etc.
    Break,
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::Session
    }
}

/// An event title, in either of the two shapes found in the collection.
///
/// Older records carry a single plain string; newer ones carry one string
/// per display language. Both shapes must keep round-tripping unchanged,
/// so neither is ever coerced into the other on write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Title {
    /// Legacy single-language title, shown as-is in every language
    Plain(String),
    /// One title per display language
    Localized(BTreeMap<Language, String>),
}

impl Title {
    /// Resolve the title for a display language.
    ///
    /// A plain title is returned unchanged whatever the language. A
    /// localized title falls back to `fr`, then `en`, then `pt`, then the
    /// empty string. The asymmetric fallback order is long-standing
    /// observable behaviour, do not reorder it.
    pub fn localize(&self, language: Language) -> &str {
        match self {
            Title::Plain(text) => text,
            Title::Localized(variants) => variants
                .get(&language)
                .or_else(|| variants.get(&Language::Fr))
                .or_else(|| variants.get(&Language::En))
                .or_else(|| variants.get(&Language::Pt))
                .map(|text| text.as_str())
                .unwrap_or(""),
        }
    }

    /// The title of a duplicated event: every language variant gets its own
    /// copy marker. A plain title gets the default language's marker.
    pub fn with_copy_marker(&self) -> Title {
        match self {
            Title::Plain(text) => {
                Title::Plain(format!("{}{}", text, copy_marker(Language::default())))
            }
            Title::Localized(variants) => Title::Localized(
                variants
                    .iter()
                    .map(|(lang, text)| (*lang, format!("{}{}", text, copy_marker(*lang))))
                    .collect(),
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Title::Plain(text) => text.is_empty(),
            Title::Localized(variants) => variants.is_empty(),
        }
    }
}

impl Default for Title {
    fn default() -> Self {
        Title::Plain(String::new())
    }
}

fn copy_marker(language: Language) -> &'static str {
    match language {
        Language::En => " (copy)",
        Language::Fr => " (copie)",
        Language::Pt => " (cópia)",
    }
}

/// One agenda entry as stored in the remote collection.
///
/// Field names follow the wire format (camelCase JSON). `date` is an ISO
/// `YYYY-MM-DD` string and the times are zero-padded `HH:MM`, which makes
/// plain string comparison chronological. No ordering between `start_time`
/// and `end_time` is enforced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub title: Title,
    #[serde(default)]
    pub moderator: String,
    #[serde(default)]
    pub speakers: String,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    /// Whether the entry is visible on the public timeline.
    ///
    /// Compatibility shim: legacy records may lack this field or carry a
    /// non-boolean value, and only the literal JSON boolean `false` has
    /// ever meant "draft". Deserialization collapses everything else
    /// (absent, `true`, the string `"false"`, ...) to `true`; writes
    /// always emit a real boolean.
    #[serde(default = "published_default", deserialize_with = "published_compat")]
    pub published: bool,
}

impl Default for EventRecord {
    fn default() -> Self {
        Self {
            date: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            title: Title::default(),
            moderator: String::new(),
            speakers: String::new(),
            kind: EventKind::default(),
            published: true,
        }
    }
}

fn published_default() -> bool {
    true
}

fn published_compat<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(!matches!(value, serde_json::Value::Bool(false)))
}

/// An agenda entry together with its store identifier.
///
/// This is what the projections hand out: the raw collection maps ids to
/// records, and the flatten step injects the id into each entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    id: EventId,
    record: EventRecord,
}

impl Event {
    pub fn new(id: EventId, record: EventRecord) -> Self {
        Self { id, record }
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }
    pub fn record(&self) -> &EventRecord {
        &self.record
    }
    pub fn date(&self) -> &str {
        &self.record.date
    }
    pub fn start_time(&self) -> &str {
        &self.record.start_time
    }
    pub fn end_time(&self) -> &str {
        &self.record.end_time
    }
    pub fn title(&self) -> &Title {
        &self.record.title
    }
    pub fn moderator(&self) -> &str {
        &self.record.moderator
    }
    pub fn speakers(&self) -> &str {
        &self.record.speakers
    }
    pub fn kind(&self) -> EventKind {
        self.record.kind
    }
    pub fn published(&self) -> bool {
        self.record.published
    }

    /// Consume the event, returning its parts
    pub fn into_parts(self) -> (EventId, EventRecord) {
        (self.id, self.record)
    }
}

/// The full collection, as delivered by a store snapshot.
///
/// A BTreeMap keeps the flatten order deterministic, so the stable sort in
/// the projections gives the same output for the same input every time.
pub type EventMap = BTreeMap<EventId, EventRecord>;

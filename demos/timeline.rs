//! This is an example of how wall-planner renders the public agenda

use wall_planner::event::{EventKind, EventRecord, Title};
use wall_planner::localization::Language;
use wall_planner::store::EventStore;
use wall_planner::{MemoryStore, TimelinePresenter};

use std::collections::BTreeMap;

#[tokio::main]
async fn main() {
    env_logger::init();

    let store = MemoryStore::new();
    populate(&store).await;

    for language in [Language::En, Language::Fr, Language::Pt].iter() {
        let presenter = TimelinePresenter::open(&store, *language)
            .await
            .unwrap();
        println!("---- public timeline ({}) ----", language);
        println!("{}", presenter.render());
    }
}

async fn populate(store: &MemoryStore) {
    let mut opening_title = BTreeMap::new();
    opening_title.insert(Language::En, "Opening session".to_string());
    opening_title.insert(Language::Fr, "Session d'ouverture".to_string());
    opening_title.insert(Language::Pt, "Sessão de abertura".to_string());

    let opening = EventRecord {
        date: "2025-10-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:30".to_string(),
        title: Title::Localized(opening_title),
        moderator: "Jean Dupont".to_string(),
        speakers: "Marie Martin, Paul Durand".to_string(),
        ..EventRecord::default()
    };

    let lunch = EventRecord {
        date: "2025-10-01".to_string(),
        start_time: "12:30".to_string(),
        end_time: "14:00".to_string(),
        title: Title::Plain("Lunch".to_string()),
        kind: EventKind::Break,
        ..EventRecord::default()
    };

    // This one stays a draft, the public timeline must not show it
    let rehearsal = EventRecord {
        date: "2025-10-02".to_string(),
        start_time: "08:00".to_string(),
        end_time: "08:45".to_string(),
        title: Title::Plain("Speaker rehearsal".to_string()),
        published: false,
        ..EventRecord::default()
    };

    for record in [opening, lunch, rehearsal].iter() {
        store.create(record.clone()).await.unwrap();
    }
}

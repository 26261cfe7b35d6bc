//! This is an example of a full admin editing session against an
//! in-process store

use url::Url;

use wall_planner::editor::SubmitOutcome;
use wall_planner::event::Title;
use wall_planner::gate::{self, AccessGate};
use wall_planner::localization::Language;
use wall_planner::store::EventStore;
use wall_planner::{AdminEditor, MemoryStore};

#[tokio::main]
async fn main() {
    env_logger::init();

    let entry = Url::parse("https://agenda.example.com/?admin").unwrap();
    assert!(gate::admin_entry_requested(&entry));

    let mut access = AccessGate::new();
    if access.log_in("admin2025") == false {
        println!("{}", AccessGate::failure_message(Language::Fr));
        return;
    }

    let language = Language::Fr;
    let mut editor = AdminEditor::new(MemoryStore::new());

    // Create an event with the form defaults, plus a title
    editor.open_for_create();
    editor.draft_mut().unwrap().title = Title::Plain("Session d'ouverture".to_string());
    let outcome = editor.submit().await.unwrap();
    println!("{}", outcome.notice(language));
    let id = match outcome {
        SubmitOutcome::Created { id, .. } => id,
        _ => unreachable!("a create form submits a creation"),
    };

    // Duplicate it: the copy starts as a draft
    let collection = editor.store().subscribe().await.unwrap().current();
    let listing = editor.list(&collection);
    editor.duplicate(&listing[0]);
    println!("{}", editor.submit().await.unwrap().notice(language));

    // Hide the original, then remove it
    editor.toggle_published(&id, true).await.unwrap();
    println!("{}", editor.confirm_delete_prompt(language));
    editor.delete(&id).await.unwrap();

    let collection = editor.store().subscribe().await.unwrap().current();
    wall_planner::utils::print_admin_listing(&collection, language);

    let public_url = access.log_out(&entry);
    println!("logged out, back to {}", public_url);
}

//! Static translation strings for the three supported display languages

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A display language supported by the agenda.
///
/// `Fr` is the default, as the agenda was originally published for a
/// francophone audience.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
    Pt,
}

impl Default for Language {
    fn default() -> Self {
        Language::Fr
    }
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Pt => "pt",
        }
    }

    /// The chrono locale used to spell out dates in this language
    pub fn chrono_locale(&self) -> chrono::format::Locale {
        match self {
            Language::En => chrono::format::Locale::en_US,
            Language::Fr => chrono::format::Locale::fr_FR,
            Language::Pt => chrono::format::Locale::pt_PT,
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            "pt" => Ok(Language::Pt),
            other => Err(format!("Unsupported language code {:?}", other)),
        }
    }
}

/// Look up a static interface string for the given language.
///
/// Unknown keys are returned unchanged, so a missing translation shows up
/// as its key rather than as an error.
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    TRANSLATIONS
        .get(&language)
        .and_then(|table| table.get(key))
        .copied()
        .unwrap_or(key)
}

static TRANSLATIONS: Lazy<HashMap<Language, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        let mut all = HashMap::new();
        all.insert(Language::En, en());
        all.insert(Language::Fr, fr());
        all.insert(Language::Pt, pt());
        all
    });

fn en() -> HashMap<&'static str, &'static str> {
    let mut t = HashMap::new();
    // Header
    t.insert("title", "WAMECA");
    t.insert("subtitle", "Journalism and Digital Public Infrastructure in Africa");
    t.insert("edition", "2025 Edition");
    // Admin panel
    t.insert("adminPanel", "Administration Panel");
    t.insert("logout", "Logout");
    t.insert("addEvent", "Add Event");
    t.insert("cancel", "Cancel");
    t.insert("newEvent", "New Event");
    t.insert("editEvent", "Edit Event");
    t.insert("createNew", "Create New Event");
    // Form
    t.insert("eventType", "Event Type");
    t.insert("session", "Session (with speakers)");
    t.insert("break", "Break (Lunch, Coffee, etc.)");
    t.insert("publicationStatus", "Publication Status");
    t.insert("published", "Published (visible to viewers)");
    t.insert("draft", "Draft (admin only)");
    t.insert("date", "Date");
    t.insert("startTime", "Start Time");
    t.insert("endTime", "End Time");
    t.insert("eventTitle", "Title");
    t.insert("moderator", "Moderator");
    t.insert("speakers", "Speakers");
    t.insert("add", "Add");
    t.insert("update", "Update");
    // Event list
    t.insert("scheduledEvents", "Scheduled Events");
    t.insert("noEvents", "No events. Click 'Add Event' to start.");
    t.insert("edit", "Edit");
    t.insert("duplicate", "Duplicate");
    t.insert("setDraft", "Set as Draft");
    t.insert("publish", "Publish");
    t.insert("delete", "Delete");
    // Timeline viewer
    t.insert("loading", "Loading timeline...");
    t.insert("noEventsScheduled", "No events scheduled at this time");
    t.insert("breakBadge", "Break");
    // Alerts
    t.insert("fillRequired", "Please fill all required fields");
    t.insert("eventPublished", "Event published successfully!");
    t.insert("eventDraft", "Event saved as draft!");
    t.insert("eventUpdated", "Event updated successfully!");
    t.insert("eventDeleted", "Event deleted successfully!");
    t.insert("confirmDelete", "Are you sure you want to delete this event?");
    // Login
    t.insert("adminTimeline", "Admin Timeline");
    t.insert("adminPassword", "Admin Password");
    t.insert("enterPassword", "Enter password");
    t.insert("login", "Login");
    t.insert("incorrectPassword", "Incorrect password");
    t.insert("adminMode", "Admin mode to edit timeline");
    t
}

fn fr() -> HashMap<&'static str, &'static str> {
    let mut t = HashMap::new();
    t.insert("title", "WAMECA");
    t.insert("subtitle", "Journalisme et Infrastructure Publique Numérique en Afrique");
    t.insert("edition", "Édition 2025");
    t.insert("adminPanel", "Panneau d'Administration");
    t.insert("logout", "Se déconnecter");
    t.insert("addEvent", "Ajouter un événement");
    t.insert("cancel", "Annuler");
    t.insert("newEvent", "Nouvel événement");
    t.insert("editEvent", "Modifier l'événement");
    t.insert("createNew", "Créer un nouvel événement");
    t.insert("eventType", "Type d'événement");
    t.insert("session", "Session (avec intervenants)");
    t.insert("break", "Pause (Lunch, Coffee, etc.)");
    t.insert("publicationStatus", "Statut de publication");
    t.insert("published", "Publié (visible par les spectateurs)");
    t.insert("draft", "Brouillon (visible uniquement en admin)");
    t.insert("date", "Date");
    t.insert("startTime", "Heure de début");
    t.insert("endTime", "Heure de fin");
    t.insert("eventTitle", "Titre");
    t.insert("moderator", "Modérateur");
    t.insert("speakers", "Intervenants");
    t.insert("add", "Ajouter");
    t.insert("update", "Mettre à jour");
    t.insert("scheduledEvents", "Événements programmés");
    t.insert("noEvents", "Aucun événement. Cliquez sur 'Ajouter un événement' pour commencer.");
    t.insert("edit", "Modifier");
    t.insert("duplicate", "Dupliquer");
    t.insert("setDraft", "Mettre en brouillon");
    t.insert("publish", "Publier");
    t.insert("delete", "Supprimer");
    t.insert("loading", "Chargement de la timeline...");
    t.insert("noEventsScheduled", "Aucun événement programmé pour le moment");
    t.insert("breakBadge", "Pause");
    t.insert("fillRequired", "Veuillez remplir tous les champs obligatoires");
    t.insert("eventPublished", "Événement publié avec succès !");
    t.insert("eventDraft", "Événement enregistré en brouillon !");
    t.insert("eventUpdated", "Événement modifié avec succès !");
    t.insert("eventDeleted", "Événement supprimé avec succès !");
    t.insert("confirmDelete", "Êtes-vous sûr de vouloir supprimer cet événement ?");
    t.insert("adminTimeline", "Admin Timeline");
    t.insert("adminPassword", "Mot de passe admin");
    t.insert("enterPassword", "Entrez le mot de passe");
    t.insert("login", "Se connecter");
    t.insert("incorrectPassword", "Mot de passe incorrect");
    t.insert("adminMode", "Mode admin pour modifier la timeline");
    t
}

fn pt() -> HashMap<&'static str, &'static str> {
    let mut t = HashMap::new();
    t.insert("title", "WAMECA");
    t.insert("subtitle", "Jornalismo e Infraestrutura Pública Digital em África");
    t.insert("edition", "Edição 2025");
    t.insert("adminPanel", "Painel de Administração");
    t.insert("logout", "Sair");
    t.insert("addEvent", "Adicionar Evento");
    t.insert("cancel", "Cancelar");
    t.insert("newEvent", "Novo Evento");
    t.insert("editEvent", "Editar Evento");
    t.insert("createNew", "Criar Novo Evento");
    t.insert("eventType", "Tipo de Evento");
    t.insert("session", "Sessão (com palestrantes)");
    t.insert("break", "Pausa (Almoço, Café, etc.)");
    t.insert("publicationStatus", "Status de Publicação");
    t.insert("published", "Publicado (visível aos espectadores)");
    t.insert("draft", "Rascunho (apenas admin)");
    t.insert("date", "Data");
    t.insert("startTime", "Hora de Início");
    t.insert("endTime", "Hora de Término");
    t.insert("eventTitle", "Título");
    t.insert("moderator", "Moderador");
    t.insert("speakers", "Palestrantes");
    t.insert("add", "Adicionar");
    t.insert("update", "Atualizar");
    t.insert("scheduledEvents", "Eventos Agendados");
    t.insert("noEvents", "Nenhum evento. Clique em 'Adicionar Evento' para começar.");
    t.insert("edit", "Editar");
    t.insert("duplicate", "Duplicar");
    t.insert("setDraft", "Definir como Rascunho");
    t.insert("publish", "Publicar");
    t.insert("delete", "Excluir");
    t.insert("loading", "Carregando linha do tempo...");
    t.insert("noEventsScheduled", "Nenhum evento agendado no momento");
    t.insert("breakBadge", "Pausa");
    t.insert("fillRequired", "Por favor, preencha todos os campos obrigatórios");
    t.insert("eventPublished", "Evento publicado com sucesso!");
    t.insert("eventDraft", "Evento salvo como rascunho!");
    t.insert("eventUpdated", "Evento atualizado com sucesso!");
    t.insert("eventDeleted", "Evento excluído com sucesso!");
    t.insert("confirmDelete", "Tem certeza de que deseja excluir este evento?");
    t.insert("adminTimeline", "Admin Timeline");
    t.insert("adminPassword", "Senha de Administrador");
    t.insert("enterPassword", "Digite a senha");
    t.insert("login", "Entrar");
    t.insert("incorrectPassword", "Senha incorreta");
    t.insert("adminMode", "Modo admin para editar a linha do tempo");
    t
}

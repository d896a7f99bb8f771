//! Full-rebuild rendering of a catalog snapshot.

use shared::domain::{participant_short_name, ActivityCatalog, ActivityRecord};

use crate::view::{ActivityCard, CatalogView, ListContent, ParticipantEntry, SelectOption};

/// Replaces both view regions from `catalog`. Idempotent.
pub fn render(catalog: &ActivityCatalog, view: &dyn CatalogView) {
    view.replace_options(build_options(catalog));
    view.replace_list(build_list(catalog));
}

/// Leaves the selector alone; it still mirrors the last good snapshot.
pub fn render_load_failure(view: &dyn CatalogView) {
    view.replace_list(ListContent::LoadFailed);
}

pub fn build_options(catalog: &ActivityCatalog) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder())
        .chain(catalog.names().map(SelectOption::activity))
        .collect()
}

pub fn build_list(catalog: &ActivityCatalog) -> ListContent {
    if catalog.is_empty() {
        return ListContent::NoActivities;
    }
    ListContent::Cards(
        catalog
            .iter()
            .map(|(name, record)| build_card(name, record))
            .collect(),
    )
}

fn build_card(name: &str, record: &ActivityRecord) -> ActivityCard {
    ActivityCard {
        name: name.to_string(),
        description: record.description.clone(),
        schedule: record.schedule.clone(),
        participants: record
            .participants
            .iter()
            .map(|email| ParticipantEntry {
                short_name: participant_short_name(email).to_string(),
                email: email.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;

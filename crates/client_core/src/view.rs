//! View regions the renderer and controller write into, and the content they carry.

use shared::domain::StatusMessage;

pub const NO_ACTIVITIES_TEXT: &str = "No activities available.";
pub const LOAD_FAILED_TEXT: &str = "Unable to load activities.";
pub const NO_PARTICIPANTS_TEXT: &str = "No participants yet.";
pub const SELECT_PLACEHOLDER_LABEL: &str = "-- Select an activity --";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub short_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub participants: Vec<ParticipantEntry>,
}

impl ActivityCard {
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn text_content(&self) -> String {
        let mut lines = vec![
            self.name.clone(),
            self.description.clone(),
            format!("Schedule: {}", self.schedule),
            format!("{} Participants", self.participant_count()),
        ];
        if self.participants.is_empty() {
            lines.push(NO_PARTICIPANTS_TEXT.to_string());
        } else {
            lines.extend(
                self.participants
                    .iter()
                    .map(|entry| format!("{} {}", entry.short_name, entry.email)),
            );
        }
        lines.join("\n")
    }
}

/// Everything the list container can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    Cards(Vec<ActivityCard>),
    NoActivities,
    LoadFailed,
}

impl ListContent {
    pub fn text_content(&self) -> String {
        match self {
            ListContent::Cards(cards) => cards
                .iter()
                .map(ActivityCard::text_content)
                .collect::<Vec<_>>()
                .join("\n\n"),
            ListContent::NoActivities => NO_ACTIVITIES_TEXT.to_string(),
            ListContent::LoadFailed => LOAD_FAILED_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Empty for the placeholder.
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: SELECT_PLACEHOLDER_LABEL.to_string(),
        }
    }

    pub fn activity(name: &str) -> Self {
        Self {
            value: name.to_string(),
            label: name.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// List container plus selector. Each call replaces the region wholesale.
pub trait CatalogView: Send + Sync {
    fn replace_list(&self, content: ListContent);
    fn replace_options(&self, options: Vec<SelectOption>);
}

/// Single-slot status area.
pub trait StatusDisplay: Send + Sync {
    fn show(&self, message: &StatusMessage);
    fn hide(&self);
}

pub trait SignupForm: Send + Sync {
    fn email(&self) -> String;
    /// Value of the selected option; empty when the placeholder is selected.
    fn selected_activity(&self) -> String;
    fn reset(&self);
}

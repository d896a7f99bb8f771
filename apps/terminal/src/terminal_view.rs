//! Stdout-backed view regions and the prompt-driven signup form.

use std::{
    io::Write,
    sync::{Mutex, PoisonError},
};

use client_core::{
    view::{NO_PARTICIPANTS_TEXT, SELECT_PLACEHOLDER_LABEL},
    CatalogView, ListContent, SelectOption, SignupForm, StatusDisplay,
};
use shared::domain::StatusMessage;
use tracing::warn;

#[derive(Default)]
struct Painted {
    list: Option<ListContent>,
    options: Vec<SelectOption>,
}

pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
    painted: Mutex<Painted>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            painted: Mutex::new(Painted::default()),
        }
    }

    pub fn options(&self) -> Vec<SelectOption> {
        self.painted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .options
            .clone()
    }

    pub fn repaint(&self) {
        let text = {
            let painted = self.painted.lock().unwrap_or_else(PoisonError::into_inner);
            let mut text = painted.list.as_ref().map(format_list).unwrap_or_default();
            text.push_str(&format_options(&painted.options));
            text
        };
        self.print(&text);
    }

    pub fn print(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            warn!(%error, "failed to write to terminal");
        }
    }

    #[cfg(test)]
    pub fn with_output<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.out.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

fn format_list(content: &ListContent) -> String {
    let mut text = String::from("== Activities ==\n");
    match content {
        ListContent::Cards(cards) => {
            for card in cards {
                text.push_str(&format!("\n### {}\n", card.name));
                text.push_str(&format!("{}\n", card.description));
                text.push_str(&format!("Schedule: {}\n", card.schedule));
                text.push_str(&format!("Participants ({})\n", card.participant_count()));
                if card.participants.is_empty() {
                    text.push_str(&format!("  {NO_PARTICIPANTS_TEXT}\n"));
                }
                for entry in &card.participants {
                    text.push_str(&format!("  - [{}] {}\n", entry.short_name, entry.email));
                }
            }
        }
        other => {
            text.push_str(&other.text_content());
            text.push('\n');
        }
    }
    text
}

fn format_options(options: &[SelectOption]) -> String {
    let mut text = String::from("\n== Select an activity ==\n");
    for (index, option) in options.iter().enumerate() {
        let label = if option.is_placeholder() {
            SELECT_PLACEHOLDER_LABEL
        } else {
            option.label.as_str()
        };
        text.push_str(&format!("  [{index}] {label}\n"));
    }
    text
}

impl<W: Write + Send> CatalogView for TerminalView<W> {
    fn replace_list(&self, content: ListContent) {
        let text = format_list(&content);
        self.painted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .list = Some(content);
        self.print(&text);
    }

    fn replace_options(&self, options: Vec<SelectOption>) {
        let text = format_options(&options);
        self.painted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .options = options;
        self.print(&text);
    }
}

impl<W: Write + Send> StatusDisplay for TerminalView<W> {
    fn show(&self, message: &StatusMessage) {
        self.print(&format!("[{}] {}", message.kind.as_str(), message.text));
    }

    fn hide(&self) {
        self.print("(status cleared)");
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub email: String,
    pub activity: String,
}

#[derive(Default)]
pub struct TerminalForm {
    fields: Mutex<FormFields>,
}

impl TerminalForm {
    pub fn set_email(&self, email: &str) {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .email = email.to_string();
    }

    pub fn select(&self, activity: &str) {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .activity = activity.to_string();
    }

    pub fn fields(&self) -> FormFields {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SignupForm for TerminalForm {
    fn email(&self) -> String {
        self.fields().email
    }

    fn selected_activity(&self) -> String {
        self.fields().activity
    }

    fn reset(&self) {
        *self.fields.lock().unwrap_or_else(PoisonError::into_inner) = FormFields::default();
    }
}

#[cfg(test)]
#[path = "tests/terminal_view_tests.rs"]
mod tests;

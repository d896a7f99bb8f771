//! Line commands typed at the prompt.

use std::str::FromStr;

use client_core::SelectOption;
use thiserror::Error;

pub const HELP_TEXT: &str = "\
commands:
  email <address>     set the email field
  select <n|name>     choose an activity (0 clears the selection)
  submit              sign up with the current form
  reload              fetch and redraw the activity list
  show                redraw the last rendered view
  help                print this help
  quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Index(usize),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Email(String),
    Select(Selection),
    Submit,
    Reload,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'; type 'help'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            // An empty email is allowed so the field can be cleared.
            "email" => Ok(Command::Email(rest.to_string())),
            "select" if rest.is_empty() => Err(CommandError::MissingArgument("select")),
            "select" => Ok(Command::Select(match rest.parse::<usize>() {
                Ok(index) => Selection::Index(index),
                Err(_) => Selection::Name(rest.to_string()),
            })),
            "submit" => Ok(Command::Submit),
            "reload" => Ok(Command::Reload),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Maps a selection onto an option value. The placeholder resolves to an
/// empty value.
pub fn resolve_selection(selection: &Selection, options: &[SelectOption]) -> Option<String> {
    match selection {
        Selection::Index(index) => options.get(*index).map(|option| option.value.clone()),
        Selection::Name(name) => options
            .iter()
            .filter(|option| !option.is_placeholder())
            .find(|option| option.value == *name)
            .or_else(|| {
                options
                    .iter()
                    .filter(|option| !option.is_placeholder())
                    .find(|option| option.value.eq_ignore_ascii_case(name))
            })
            .map(|option| option.value.clone()),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;

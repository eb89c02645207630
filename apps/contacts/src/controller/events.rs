//! UI events and the terminal command grammar.

use shared::domain::{Contact, ContactId};
use thiserror::Error;

use crate::controller::reducer::DraftField;

pub enum UiEvent {
    ContactsUpdated(Vec<Contact>),
    ErrorRaised(String),
    Command(ShellCommand),
    InputClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    ToggleAdd,
    Edit(ContactId),
    SetField(DraftField, String),
    Submit,
    Cancel,
    Delete(ContactId),
    List,
    Export,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{0}` needs a contact id")]
    MissingId(&'static str),
    #[error("`{0}` is not a contact id")]
    InvalidId(String),
}

pub const HELP: &str = "\
commands:
  add                 open or close the new-contact form
  edit <id>           edit an existing contact
  name <value>        set the draft name
  phone <value>       set the draft phone number
  email <value>       set the draft email
  submit              save the draft
  cancel              discard the draft
  delete <id>         delete a contact
  list                show the current list
  export              print the list as JSON
  help                show this text
  quit                exit";

/// Field values are taken verbatim after the first separator; trimming is left to validation.
pub fn parse_command(line: &str) -> Result<ShellCommand, CommandParseError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandParseError::Empty),
        "add" | "new" => Ok(ShellCommand::ToggleAdd),
        "edit" => parse_id("edit", rest).map(ShellCommand::Edit),
        "delete" | "rm" => parse_id("delete", rest).map(ShellCommand::Delete),
        "name" => Ok(ShellCommand::SetField(DraftField::Name, rest.to_string())),
        "phone" => Ok(ShellCommand::SetField(DraftField::PhoneNumber, rest.to_string())),
        "email" => Ok(ShellCommand::SetField(DraftField::Email, rest.to_string())),
        "submit" | "save" => Ok(ShellCommand::Submit),
        "cancel" => Ok(ShellCommand::Cancel),
        "list" | "ls" => Ok(ShellCommand::List),
        "export" => Ok(ShellCommand::Export),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(CommandParseError::Unknown(other.to_string())),
    }
}

fn parse_id(command: &'static str, rest: &str) -> Result<ContactId, CommandParseError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(CommandParseError::MissingId(command));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(ContactId(id)),
        _ => Err(CommandParseError::InvalidId(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_value_with_inner_spaces() {
        assert_eq!(
            parse_command("name Ann Marie\n"),
            Ok(ShellCommand::SetField(
                DraftField::Name,
                "Ann Marie".to_string()
            ))
        );
    }

    #[test]
    fn bare_field_command_sets_empty_value() {
        assert_eq!(
            parse_command("email"),
            Ok(ShellCommand::SetField(DraftField::Email, String::new()))
        );
    }

    #[test]
    fn parses_ids_for_edit_and_delete() {
        assert_eq!(parse_command("edit 4"), Ok(ShellCommand::Edit(ContactId(4))));
        assert_eq!(
            parse_command("  DELETE  12 "),
            Ok(ShellCommand::Delete(ContactId(12)))
        );
    }

    #[test]
    fn rejects_missing_or_invalid_ids() {
        assert_eq!(
            parse_command("edit"),
            Err(CommandParseError::MissingId("edit"))
        );
        assert_eq!(
            parse_command("delete zero"),
            Err(CommandParseError::InvalidId("zero".to_string()))
        );
        assert_eq!(
            parse_command("delete 0"),
            Err(CommandParseError::InvalidId("0".to_string()))
        );
    }

    #[test]
    fn reports_unknown_and_empty_input() {
        assert_eq!(parse_command("   "), Err(CommandParseError::Empty));
        assert_eq!(
            parse_command("frobnicate"),
            Err(CommandParseError::Unknown("frobnicate".to_string()))
        );
    }
}

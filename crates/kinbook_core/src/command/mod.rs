//! Interactive command boundary.
//!
//! # Responsibility
//! - Tokenize one input line into a command word plus positional arguments.
//! - Run the matching directory operation and render its reply text.
//! - Map every failure to a reply so the session loop never sees an error.
//!
//! # Invariants
//! - Command words are case-insensitive; arguments keep their case.
//! - Unknown words and empty lines are normal replies, not errors.
//! - Log lines carry the command word and a stable error code only, never
//!   argument text.

use crate::model::directory::Directory;
use crate::model::field::FieldError;
use crate::model::record::ContactRecord;
use crate::model::DirectoryError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Recognized command words, lowercase.
const COMMAND_WORDS: &[&str] = &[
    "hello",
    "add",
    "change",
    "phone",
    "all",
    "add-birthday",
    "show-birthday",
    "birthdays",
    "close",
    "exit",
];

/// Failure raised while executing a recognized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Recognized command invoked with the wrong argument shape.
    BadArguments {
        command: &'static str,
        usage: &'static str,
    },
    /// Failure surfaced by a record or directory operation.
    Directory(DirectoryError),
}

impl CommandError {
    /// Stable code for log lines.
    fn code(&self) -> &'static str {
        match self {
            Self::BadArguments { .. } => "bad_arguments",
            Self::Directory(DirectoryError::Field(_)) => "validation",
            Self::Directory(DirectoryError::NameNotFound(_)) => "name_not_found",
            Self::Directory(DirectoryError::PhoneIndexOutOfRange { .. }) => "phone_index",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadArguments { command, usage } => write!(f, "usage: {command} {usage}"),
            Self::Directory(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BadArguments { .. } => None,
            Self::Directory(err) => Some(err),
        }
    }
}

impl From<DirectoryError> for CommandError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

impl From<FieldError> for CommandError {
    fn from(value: FieldError) -> Self {
        Self::Directory(DirectoryError::Field(value))
    }
}

/// What the session loop should do with a handled line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Print the reply (blank replies print nothing) and keep going.
    Reply(String),
    /// Print the farewell and end the session.
    Exit(String),
}

/// Runs one input line against the directory, mapping failures to replies.
///
/// This is the wrapper the session loop calls: every [`CommandError`] becomes
/// its reply string, so no input can terminate the session.
pub fn respond(line: &str, directory: &mut Directory) -> CommandOutcome {
    match execute(line, directory) {
        Ok(outcome) => {
            info!(
                "event=command module=command status=ok word={}",
                log_word(line)
            );
            outcome
        }
        Err(err) => {
            warn!(
                "event=command module=command status=error word={} error_code={}",
                log_word(line),
                err.code()
            );
            CommandOutcome::Reply(error_reply(&err).to_string())
        }
    }
}

/// Parses one input line and runs the matching directory operation.
///
/// The first whitespace token is the command word, lowercased before
/// matching; the remaining tokens are positional arguments.
pub fn execute(line: &str, directory: &mut Directory) -> Result<CommandOutcome, CommandError> {
    let mut tokens = line.split_whitespace();
    let Some(word) = tokens.next() else {
        return Ok(CommandOutcome::Reply("Invalid command.".to_string()));
    };
    let word = word.to_lowercase();
    let args: Vec<&str> = tokens.collect();

    let reply = match word.as_str() {
        "hello" => "How can I help you?".to_string(),
        "add" => add_contact(&args, directory)?,
        "change" => change_contact(&args, directory)?,
        "phone" => show_phone(&args, directory)?,
        "all" => show_all(directory),
        "add-birthday" => add_birthday(&args, directory)?,
        "show-birthday" => show_birthday(&args, directory)?,
        "birthdays" => birthdays(directory),
        "close" | "exit" => return Ok(CommandOutcome::Exit("Good bye!".to_string())),
        _ => "Invalid command.".to_string(),
    };

    Ok(CommandOutcome::Reply(reply))
}

/// Maps a command failure to its user-facing reply.
///
/// Reply text is the long-standing session wording, kept verbatim, including
/// the phone-position line that reads like a name lookup failure.
pub fn error_reply(err: &CommandError) -> &'static str {
    match err {
        CommandError::BadArguments { .. } | CommandError::Directory(DirectoryError::Field(_)) => {
            "Give me name and phone please."
        }
        CommandError::Directory(DirectoryError::NameNotFound(_)) => "No such name found.",
        CommandError::Directory(DirectoryError::PhoneIndexOutOfRange { .. }) => {
            "The name not found in list."
        }
    }
}

fn add_contact(args: &[&str], directory: &mut Directory) -> Result<String, CommandError> {
    let (name, phone) = two_args("add", "<name> <phone>", args)?;
    let mut record = ContactRecord::new(name)?;
    record.add_phone(phone)?;
    directory.add_record(record);
    Ok("Contact added.".to_string())
}

// Same replacement semantics as `add`: a fresh single-phone record overwrites
// whatever was stored under the name. Only the reply differs.
fn change_contact(args: &[&str], directory: &mut Directory) -> Result<String, CommandError> {
    let (name, phone) = two_args("change", "<name> <phone>", args)?;
    let mut record = ContactRecord::new(name)?;
    record.add_phone(phone)?;
    directory.add_record(record);
    Ok("Contact updated.".to_string())
}

fn show_phone(args: &[&str], directory: &Directory) -> Result<String, CommandError> {
    let name = one_arg("phone", "<name>", args)?;
    let record = directory
        .find(name)
        .ok_or_else(|| DirectoryError::NameNotFound(name.to_string()))?;
    Ok(record.to_string())
}

fn show_all(directory: &Directory) -> String {
    directory
        .records()
        .map(|record| format!("{}: {record}", record.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn add_birthday(args: &[&str], directory: &mut Directory) -> Result<String, CommandError> {
    let (name, birthday) = two_args("add-birthday", "<name> <DD.MM.YYYY>", args)?;
    let record = directory
        .find_mut(name)
        .ok_or_else(|| DirectoryError::NameNotFound(name.to_string()))?;
    record.set_birthday(birthday)?;
    Ok("Birthday added.".to_string())
}

fn show_birthday(args: &[&str], directory: &Directory) -> Result<String, CommandError> {
    let name = one_arg("show-birthday", "<name>", args)?;
    let record = directory
        .find(name)
        .ok_or_else(|| DirectoryError::NameNotFound(name.to_string()))?;
    Ok(match record.birthday() {
        Some(birthday) => birthday.as_str().to_string(),
        None => "No birthday set.".to_string(),
    })
}

fn birthdays(directory: &Directory) -> String {
    directory
        .upcoming_birthdays()
        .iter()
        .map(|greeting| format!("{}: {}", greeting.name, greeting.congratulation_date))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Exactly two arguments; extra or missing tokens are a usage error.
fn two_args<'a>(
    command: &'static str,
    usage: &'static str,
    args: &[&'a str],
) -> Result<(&'a str, &'a str), CommandError> {
    match args {
        &[first, second] => Ok((first, second)),
        _ => Err(CommandError::BadArguments { command, usage }),
    }
}

/// At least one argument; extra tokens are ignored.
fn one_arg<'a>(
    command: &'static str,
    usage: &'static str,
    args: &[&'a str],
) -> Result<&'a str, CommandError> {
    args.first()
        .copied()
        .ok_or(CommandError::BadArguments { command, usage })
}

/// Command word for log lines; unrecognized input is logged as `unknown`
/// rather than echoing user text.
fn log_word(line: &str) -> &'static str {
    let Some(first) = line.split_whitespace().next() else {
        return "none";
    };
    let lowered = first.to_lowercase();
    COMMAND_WORDS
        .iter()
        .find(|word| **word == lowered)
        .copied()
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::log_word;

    #[test]
    fn log_word_never_echoes_input() {
        assert_eq!(log_word("add Edd 1234567890"), "add");
        assert_eq!(log_word("ADD Edd 1234567890"), "add");
        assert_eq!(log_word("sudo rm -rf"), "unknown");
        assert_eq!(log_word("   "), "none");
    }
}

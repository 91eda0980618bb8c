use crate::error::{NimbusError, Result};

/// The fixed command set. The first whitespace-delimited token of a line
/// selects one of these, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Bye,
    List,
    Todo,
    Deadline,
    Event,
    Mark,
    Unmark,
    Delete,
    Find,
    FindDate,
    Clear,
}

impl Command {
    pub fn parse(token: &str) -> Result<Self> {
        match token.to_uppercase().as_str() {
            "BYE" => Ok(Command::Bye),
            "LIST" => Ok(Command::List),
            "TODO" => Ok(Command::Todo),
            "DEADLINE" => Ok(Command::Deadline),
            "EVENT" => Ok(Command::Event),
            "MARK" => Ok(Command::Mark),
            "UNMARK" => Ok(Command::Unmark),
            "DELETE" => Ok(Command::Delete),
            "FIND" => Ok(Command::Find),
            "FIND_DATE" => Ok(Command::FindDate),
            "CLEAR" => Ok(Command::Clear),
            _ => Err(NimbusError::UnknownCommand),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParsedInput {
    pub command: Command,
    /// Everything after the command token, untouched apart from trimming.
    /// Marker and index parsing is the task list's job.
    pub args: String,
}

pub fn parse_input(line: &str) -> Result<ParsedInput> {
    let line = line.trim();
    if line.is_empty() {
        return Err(NimbusError::EmptyInput);
    }
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command = Command::parse(head)?;
    Ok(ParsedInput {
        command,
        args: rest.trim().to_string(),
    })
}

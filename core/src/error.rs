use thiserror::Error;

/// Everything that can go wrong while handling a command. All variants are
/// recoverable at the command boundary: the session renders the message and
/// keeps going.
#[derive(Debug, Error)]
pub enum NimbusError {
    #[error("Oops! It seems like you entered nothing.")]
    EmptyInput,

    #[error("Oops! I don't recognize that command.")]
    UnknownCommand,

    #[error("Oops! The description of a {kind} cannot be empty.")]
    EmptyDescription { kind: &'static str },

    #[error("Oops! Deadlines need a description and a '/by' date.")]
    MissingDateMarker,

    #[error("Oops! Events need a description, '/from' time, and '/to' time.")]
    MissingRangeMarkers,

    #[error("Oops! Invalid date format! Try examples like:\n{examples}")]
    InvalidDateFormat { examples: String },

    #[error("Oops! Please provide a valid task number.")]
    InvalidIndexFormat,

    #[error("Oops! That task number doesn't exist. Please check your list.")]
    IndexOutOfRange,

    #[error("Error {action}: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl NimbusError {
    pub(crate) fn io(action: &'static str, source: std::io::Error) -> Self {
        NimbusError::Io { action, source }
    }
}

pub type Result<T, E = NimbusError> = std::result::Result<T, E>;

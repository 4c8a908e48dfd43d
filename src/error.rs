use thiserror::Error;

/// Every failure a run can end in. None of them are recoverable: the
/// message is printed and the process exits with status 1.
#[derive(Debug, Error)]
pub enum GostError {
    #[error("{0}\nCould not properly execute command; exiting ...")]
    ArgumentParse(String),

    #[error("Cannot read from stdin: {0}")]
    InputUnavailable(String),

    #[error("Please specify a valid file with -f or --file, or add something to your clipboard with -c or --clip.")]
    NoSourceSpecified,

    #[error("Error reading clipboard: {0}")]
    ClipboardRead(String),

    #[error("Your clipboard is empty; exiting ...")]
    ClipboardEmpty,

    #[error("Invalid file specified: {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Stdin is empty; exiting ...")]
    StdinEmpty,

    #[error("Unable to create gist: {0}")]
    RemoteSubmission(String),
}

impl GostError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}

use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use derive_more::Display;
use snafu::Snafu;

use crate::materializer::MaterializeError;

/// Public operations of a [`Teardown`](crate::Teardown), as named in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Action {
    #[display("prepare the root directory")]
    Prepare,
    #[display("create the file tree")]
    Create,
    #[display("read a file")]
    Read,
    #[display("edit the file")]
    Edit,
    #[display("remove the file")]
    Remove,
    #[display("reset the root directory")]
    Reset,
    #[display("clean up the root directory")]
    Cleanup,
}

impl Action {
    fn missing_path_reason(&self) -> &'static str {
        match self {
            Action::Edit | Action::Remove => {
                "file does not exist. Did you forget to call \"create\"?"
            }
            _ => "given path does not exist.",
        }
    }

    fn directory_reason(&self) -> &'static str {
        match self {
            Action::Edit => "given path is a directory.",
            _ => "given path points to a directory.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Lifecycle {
    #[display("unprepared")]
    Unprepared,
    #[display("prepared")]
    Prepared,
    #[display("torn down")]
    TornDown,
}

/// Coarse category of a [`TeardownError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    IsADirectory,
    Misuse,
    Io,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TeardownError {
    #[snafu(display(
        "Failed to {} at \"{}\": {}",
        action,
        path,
        action.missing_path_reason()
    ))]
    NotFound { action: Action, path: String },
    #[snafu(display(
        "Failed to {} at \"{}\": {}",
        action,
        path,
        action.directory_reason()
    ))]
    IsADirectory { action: Action, path: String },
    #[snafu(display("Cannot {} while the teardown is {}", action, state))]
    Misuse { action: Action, state: Lifecycle },
    #[snafu(display("Failed to {} at {}", action, path.display()))]
    Io {
        action: Action,
        path: PathBuf,
        source: io::Error,
    },
    #[snafu(display("Failed to {}", action))]
    Materialize {
        action: Action,
        source: MaterializeError,
    },
    #[snafu(display("Failed to {} at \"{}\": content is not valid UTF-8", action, path))]
    Decode {
        action: Action,
        path: String,
        source: FromUtf8Error,
    },
}

impl TeardownError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TeardownError::NotFound { .. } => ErrorKind::NotFound,
            TeardownError::IsADirectory { .. } => ErrorKind::IsADirectory,
            TeardownError::Misuse { .. } => ErrorKind::Misuse,
            TeardownError::Io { .. }
            | TeardownError::Materialize { .. }
            | TeardownError::Decode { .. } => ErrorKind::Io,
        }
    }
}

use std::fmt;

use kalcore::calendar::errors::ErrorType;
use kalcore::prompt::FormError;
use kalcore::storage::errors::StorageError;
use thiserror::Error;

use crate::config::ConfigReadError;

#[derive(Error)]
pub(crate) enum AppError {
    #[error("Calendar error: {0}")]
    CalendarError(#[from] ErrorType),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigReadError),

    #[error("Invalid event: {0}")]
    FormError(#[from] FormError),

    #[error("Invalid argument(s): {0}")]
    InvalidArg(String),

    #[error("Malformed date argument: {0}")]
    MalformedDate(String),

    #[error("Invalid subcommand, try --help to view all subcommands and options")]
    InvalidSubcommand,
}

// The default Debug implementation displays the enum like so:
// InvalidArg("content inside") -- which is not quite helpful since this used to
// display the item using the Termination trait at our main function.
impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

use std::fmt;
use std::process;

/// Exit codes for the CLI.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

///
/// CliError
///

pub enum CliError {
    /// Bad file path, unreadable input, parse failure.
    Input(String),
    /// No session directory matched the requested label.
    NotFound(String),
    /// The viewer process could not be started.
    Launch(String),
    /// Argument / usage errors.
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(msg) | Self::NotFound(msg) | Self::Launch(msg) | Self::Usage(msg) => {
                write!(f, "error: {msg}")
            }
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Input(e.to_string())
    }
}

impl From<surfview::schema::Error> for CliError {
    fn from(e: surfview::schema::Error) -> Self {
        Self::Input(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Input(format!("JSON encode error: {e}"))
    }
}

/// Print the error and exit with the appropriate code.
pub fn exit_with_error(err: CliError) -> ! {
    eprintln!("{err}");
    let code = match &err {
        CliError::Usage(_) => EXIT_USAGE,
        _ => EXIT_ERROR,
    };
    process::exit(code)
}

pub type CliResult<T> = std::result::Result<T, CliError>;

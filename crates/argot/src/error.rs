use crate::option::OptionKind;

/// Exit status used when a parse error terminates the process.
pub const ERROR_EXIT_CODE: i32 = 1;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An option, flag or command name that is not registered.
    Unrecognized,
    /// A value-taking option at the end of the argument stream.
    MissingValue,
    /// A numeric literal with trailing garbage, or outside the target range.
    MalformedLiteral,
    /// `=` on a flag, an empty `=` value, or a bare `help` command.
    StructuralMisuse,
    /// A query against a name or type the parser doesn't know about.
    Query,
}

/// Everything that can go wrong while parsing or querying.
///
/// The `Display` form is the bare message; [`Error::diagnostic`] adds the
/// `Error:` prefix and trailing period used on stderr.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("--{0} is not a recognised flag or option name")]
    UnknownLong(String),

    #[error("{}", unknown_short(.ch, .token))]
    UnknownShort { ch: char, token: String },

    #[error("{prefix}{name} is not a recognised option name")]
    UnknownOption { prefix: &'static str, name: String },

    #[error("'{0}' is not a recognised command")]
    UnknownCommand(String),

    /// The payload is the display form of the option, e.g. `--out` or `'o' in -vo`.
    #[error("missing argument for {0}")]
    MissingValue(String),

    #[error("missing value for {prefix}{name}")]
    EmptyValue { prefix: &'static str, name: String },

    #[error("{prefix}{name} is a flag and cannot take a value")]
    FlagWithValue { prefix: &'static str, name: String },

    #[error("the help command requires an argument")]
    HelpCommandMissingArg,

    #[error("cannot parse '{0}' as an integer")]
    MalformedInt(String),

    #[error("cannot parse '{0}' as a floating-point value")]
    MalformedFloat(String),

    #[error("'{0}' is out of range")]
    OutOfRange(String),

    #[error("'{0}' is not a registered flag or option name")]
    UnknownName(String),

    #[error("'{name}' is registered as a {actual} option but was queried as {expected}")]
    KindMismatch {
        name: String,
        expected: OptionKind,
        actual: OptionKind,
    },
}

fn unknown_short(ch: &char, token: &str) -> String {
    if token.chars().count() > 1 {
        format!("'{ch}' in -{token} is not a recognised flag or option name")
    } else {
        format!("-{ch} is not a recognised flag or option name")
    }
}

impl Error {
    /// The broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownLong(_)
            | Self::UnknownShort { .. }
            | Self::UnknownOption { .. }
            | Self::UnknownCommand(_) => ErrorKind::Unrecognized,
            Self::MissingValue(_) => ErrorKind::MissingValue,
            Self::EmptyValue { .. } | Self::FlagWithValue { .. } | Self::HelpCommandMissingArg => {
                ErrorKind::StructuralMisuse
            }
            Self::MalformedInt(_) | Self::MalformedFloat(_) | Self::OutOfRange(_) => {
                ErrorKind::MalformedLiteral
            }
            Self::UnknownName(_) | Self::KindMismatch { .. } => ErrorKind::Query,
        }
    }

    /// The single-line diagnostic printed by [`Error::exit`].
    pub fn diagnostic(&self) -> String {
        format!("Error: {self}.")
    }

    /// Print the diagnostic to stderr and terminate the process.
    pub fn exit(&self) -> ! {
        eprintln!("{}", self.diagnostic());
        std::process::exit(ERROR_EXIT_CODE)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

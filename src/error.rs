use std::ffi::OsString;

use thiserror::Error;

use crate::{Action, Arity, ValueKind};

/// Everything that can go wrong while parsing a command line.
///
/// `ShowHelp` and `ShowVersion` are not failures: the text has already been
/// printed and the host only needs to stop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid option \"{name}\"")]
    InvalidOption { name: String },

    #[error("{option}: invalid choice \"{value}\" (choose from: {})", .choices.join(", "))]
    InvalidChoice { option: String, value: String, choices: Vec<String> },

    #[error("{option}: invalid {kind} value: \"{value}\"")]
    InvalidType { option: String, kind: ValueKind, value: String },

    #[error("{option}: expected {expected} argument(s) but was provided {found}")]
    TooFewArgs { option: String, expected: usize, found: usize },

    #[error("{option}: at least one argument required")]
    MissingOneOrMoreArgs { option: String },

    #[error("option \"{name}\" required")]
    MissingOption { name: String },

    #[error("must use an available command: {{{}}}", .names.join(","))]
    MissingParser { names: Vec<String> },

    #[error("missing environmental variable \"{name}\"")]
    MissingEnvVar { name: String },

    #[error("invalid flag name \"{name}\"")]
    InvalidFlagName { name: String },

    #[error("key \"{key}\" does not exist in namespace")]
    UnknownKey { key: String },

    #[error("key \"{key}\" holds a single value, not a list: \"{value}\"")]
    NotAList { key: String, value: String },

    #[error("invalid utf8 in argument: {arg:?}")]
    InvalidUtf8 { arg: OsString },

    #[error("arguments were already parsed")]
    AlreadyParsed,

    #[error("help requested")]
    ShowHelp,

    #[error("version requested")]
    ShowVersion,
}

impl Error {
    pub fn is_help(&self) -> bool {
        matches!(self, Error::ShowHelp)
    }

    pub fn is_version(&self) -> bool {
        matches!(self, Error::ShowVersion)
    }

    /// True for the "stop, output already shown" signals.
    pub fn is_sentinel(&self) -> bool {
        self.is_help() || self.is_version()
    }
}

/// A mistake in how the host program declared its arguments.
///
/// These are bugs in the host, not bad user input, so hosts usually
/// propagate them straight out of `main`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid nargs: \"{0}\", must be an integer or one of: ?*+r")]
    InvalidArity(String),

    #[error("option {option}: action {action:?} cannot take nargs \"{arity}\"")]
    ArityMismatch { option: String, action: Action, arity: Arity },

    #[error("argument with dest \"{dest}\" has no names")]
    NoNames { dest: String },

    #[error("name \"{name}\" is already used by another argument")]
    DuplicateName { name: String },

    #[error("invalid command name \"{name}\"")]
    DuplicateCommand { name: String },

    #[error("option {option}: choice \"{choice}\" is not a valid {kind} value")]
    ChoiceKind { option: String, choice: String, kind: ValueKind },
}

//! Checks run on every value an action consumes, before anything is stored.

use crate::{Argument, Error, Result, ValueKind};

/// Choice membership first, then type coercibility.
pub(crate) fn value(arg: &Argument, value: &str) -> Result<()> {
    choice(arg, value)?;
    kind(arg, value)
}

pub(crate) fn choice(arg: &Argument, value: &str) -> Result<()> {
    let choices = arg.valid_choices();
    if choices.is_empty() || choices.iter().any(|it| it == value) {
        return Ok(());
    }
    Err(Error::InvalidChoice {
        option: arg.display_name(),
        value: value.to_string(),
        choices: choices.to_vec(),
    })
}

pub(crate) fn kind(arg: &Argument, value: &str) -> Result<()> {
    if coercible(arg.value_kind(), value) {
        return Ok(());
    }
    Err(Error::InvalidType {
        option: arg.display_name(),
        kind: arg.value_kind(),
        value: value.to_string(),
    })
}

pub(crate) fn coercible(kind: ValueKind, value: &str) -> bool {
    match kind {
        ValueKind::Untyped | ValueKind::String => true,
        ValueKind::Int => value.parse::<i64>().is_ok(),
        ValueKind::Uint => value.parse::<u64>().is_ok(),
        ValueKind::Float => value.parse::<f64>().is_ok(),
        ValueKind::Bool => parse_bool(value).is_some(),
    }
}

/// Accepts the usual spellings: `1`, `t`, `true`, `TRUE`, `True` and their
/// negative counterparts.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

use std::{fmt, str::FromStr};

use crate::ConfigError;

/// How many trailing tokens an argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` tokens.
    Exact(usize),
    /// `?`: zero or one.
    Optional,
    /// `*`: any number, including zero.
    ZeroOrMore,
    /// `+`: at least one.
    OneOrMore,
    /// `r`: everything left unclaimed once option tokens are handled.
    Remainder,
}

impl Arity {
    pub fn is_remainder(self) -> bool {
        self == Arity::Remainder
    }

    /// Whether values land in the namespace as a list rather than a scalar.
    pub(crate) fn is_multiple(self) -> bool {
        !matches!(self, Arity::Exact(0 | 1) | Arity::Optional)
    }
}

impl Default for Arity {
    fn default() -> Self {
        Arity::Exact(0)
    }
}

impl From<usize> for Arity {
    fn from(n: usize) -> Self {
        Arity::Exact(n)
    }
}

impl FromStr for Arity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let res = match s {
            "?" => Arity::Optional,
            "*" => Arity::ZeroOrMore,
            "+" => Arity::OneOrMore,
            "r" | "R" => Arity::Remainder,
            _ => match s.parse::<usize>() {
                Ok(n) => Arity::Exact(n),
                Err(_) => return Err(ConfigError::InvalidArity(s.to_string())),
            },
        };
        Ok(res)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::Optional => f.write_str("?"),
            Arity::ZeroOrMore => f.write_str("*"),
            Arity::OneOrMore => f.write_str("+"),
            Arity::Remainder => f.write_str("r"),
        }
    }
}

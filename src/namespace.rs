use std::{fmt, str::FromStr};

use indexmap::IndexMap;

use crate::{validate, Error, Result, ValueKind};

/// A parsed value. Values keep the text the user typed; typed accessors on
/// [`Namespace`] do the conversion on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
    Bool(bool),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::List(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => f.write_str(s),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Destination name to value mapping produced by a parse.
///
/// Keys keep their insertion order, which is the declaration order of the
/// arguments that seeded them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    values: IndexMap<String, Value>,
}

impl Namespace {
    pub fn new() -> Namespace {
        Namespace::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Namespace {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// `None` means the key was never set, which is different from being set
    /// to an empty string.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fails with [`Error::MissingOption`] for the first absent key.
    pub fn require(&self, keys: &[&str]) -> Result<()> {
        match keys.iter().find(|it| !self.contains_key(it)) {
            Some(key) => Err(Error::MissingOption { name: key.to_string() }),
            None => Ok(()),
        }
    }

    /// Copies every entry of `other` over this namespace.
    pub fn merge(&mut self, other: Namespace) {
        self.values.extend(other.values);
    }

    pub fn string(&self, key: &str) -> Result<&str> {
        let value = self.lookup(key)?;
        match value {
            Value::Scalar(s) => Ok(s),
            _ => Err(mismatch(key, ValueKind::String, value)),
        }
    }

    pub fn list(&self, key: &str) -> Result<&[String]> {
        let value = self.lookup(key)?;
        match value {
            Value::List(items) => Ok(items),
            _ => Err(Error::NotAList { key: key.to_string(), value: value.to_string() }),
        }
    }

    /// Native booleans, or scalars spelled like one (`true`, `0`, `F`, ...).
    pub fn flag(&self, key: &str) -> Result<bool> {
        let value = self.lookup(key)?;
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Scalar(s) => {
                validate::parse_bool(s).ok_or_else(|| mismatch(key, ValueKind::Bool, value))
            }
            Value::List(_) => Err(mismatch(key, ValueKind::Bool, value)),
        }
    }

    pub fn int(&self, key: &str) -> Result<i64> {
        self.scalar_as(key, ValueKind::Int)
    }

    pub fn uint(&self, key: &str) -> Result<u64> {
        self.scalar_as(key, ValueKind::Uint)
    }

    pub fn float(&self, key: &str) -> Result<f64> {
        self.scalar_as(key, ValueKind::Float)
    }

    /// Parses a scalar into any `FromStr` type.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<T> {
        self.scalar_as(key, ValueKind::Untyped)
    }

    fn scalar_as<T: FromStr>(&self, key: &str, kind: ValueKind) -> Result<T> {
        let value = self.lookup(key)?;
        match value {
            Value::Scalar(s) => s.parse::<T>().map_err(|_| mismatch(key, kind, value)),
            _ => Err(mismatch(key, kind, value)),
        }
    }

    fn lookup(&self, key: &str) -> Result<&Value> {
        self.values.get(key).ok_or_else(|| Error::UnknownKey { key: key.to_string() })
    }

    /// Appends to the list at `key`, replacing anything that isn't a list.
    pub(crate) fn push(&mut self, key: &str, value: String) {
        match self.values.get_mut(key) {
            Some(Value::List(items)) => items.push(value),
            _ => {
                self.values.insert(key.to_string(), Value::List(vec![value]));
            }
        }
    }
}

fn mismatch(key: &str, kind: ValueKind, value: &Value) -> Error {
    Error::InvalidType { option: key.to_string(), kind, value: value.to_string() }
}

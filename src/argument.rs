use std::fmt;

use crate::{validate, Action, Arity, ConfigError};

/// Scalar type an argument's values must be coercible to.
///
/// Only used for validation: the namespace keeps the original strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    #[default]
    Untyped,
    String,
    Int,
    Uint,
    Float,
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Untyped => "untyped",
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::Uint => "uint",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
        };
        f.write_str(s)
    }
}

/// Declaration of one parseable unit: a flag, an option taking values, or a
/// positional argument.
///
/// Built with chained setters and handed to [`Parser::add`](crate::Parser::add),
/// which checks that the pieces fit together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    names: Vec<String>,
    dest: String,
    arity: Arity,
    action: Action,
    constant: String,
    default: String,
    kind: ValueKind,
    choices: Vec<String>,
    required: bool,
    positional: bool,
    help: String,
    metavars: Vec<String>,
}

impl Argument {
    /// A bare argument: takes no values and stores `true` when present.
    ///
    /// `names` is a space separated list of aliases, such as `"o output"`.
    /// Leading dashes are ignored, so `"-o --output"` means the same thing.
    pub fn new(names: &str, dest: &str) -> Argument {
        let names = names
            .split_whitespace()
            .map(|it| it.trim_start_matches('-'))
            .filter(|it| !it.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();
        let dest = match dest {
            "" => names.first().cloned().unwrap_or_default(),
            _ => dest.to_string(),
        };
        Argument {
            names,
            dest,
            arity: Arity::Exact(0),
            action: Action::StoreTrue,
            constant: String::new(),
            default: String::new(),
            kind: ValueKind::Untyped,
            choices: Vec::new(),
            required: false,
            positional: false,
            help: String::new(),
            metavars: Vec::new(),
        }
    }

    /// A boolean switch defaulting to `false`.
    pub fn flag(names: &str, dest: &str) -> Argument {
        Argument::new(names, dest).default("false")
    }

    /// A named option taking exactly one value.
    pub fn option(names: &str, dest: &str) -> Argument {
        Argument::new(names, dest).nargs(Arity::Exact(1)).action(Action::Store)
    }

    /// A positional argument taking exactly one value.
    pub fn positional(names: &str, dest: &str) -> Argument {
        Argument::option(names, dest).as_positional()
    }

    pub fn nargs(mut self, arity: impl Into<Arity>) -> Argument {
        self.arity = arity.into();
        self
    }

    pub fn action(mut self, action: Action) -> Argument {
        self.action = action;
        self
    }

    pub fn constant(mut self, value: &str) -> Argument {
        self.constant = value.to_string();
        self
    }

    /// Value seeded into the namespace before parsing.
    ///
    /// A default written as `$NAME` is looked up in the environment when
    /// parsing starts.
    pub fn default(mut self, value: &str) -> Argument {
        self.default = value.to_string();
        self
    }

    pub fn dest(mut self, dest: &str) -> Argument {
        self.dest = dest.to_string();
        self
    }

    pub fn kind(mut self, kind: ValueKind) -> Argument {
        self.kind = kind;
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Argument
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn required(mut self) -> Argument {
        self.required = true;
        self
    }

    pub fn not_required(mut self) -> Argument {
        self.required = false;
        self
    }

    pub fn as_positional(mut self) -> Argument {
        self.positional = true;
        self
    }

    pub fn not_positional(mut self) -> Argument {
        self.positional = false;
        self
    }

    pub fn help(mut self, text: &str) -> Argument {
        self.help = text.to_string();
        self
    }

    /// Placeholder names for the values in usage text. The last one is
    /// repeated when the arity asks for more values than there are names.
    pub fn metavar<I, S>(mut self, metavars: I) -> Argument
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metavars = metavars.into_iter().map(Into::into).collect();
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn dest_name(&self) -> &str {
        &self.dest
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn action_kind(&self) -> Action {
        self.action
    }

    pub fn constant_value(&self) -> &str {
        &self.constant
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind
    }

    pub fn valid_choices(&self) -> &[String] {
        &self.choices
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn metavars(&self) -> &[String] {
        &self.metavars
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|it| it == name)
    }

    /// All names with their dash prefixes, e.g. `-o, --output`.
    pub fn display_name(&self) -> String {
        self.names.iter().map(|it| self.prefixed(it)).collect::<Vec<_>>().join(", ")
    }

    fn prefixed(&self, name: &str) -> String {
        if self.positional {
            return name.to_string();
        }
        match name.chars().count() {
            1 => format!("-{name}"),
            _ => format!("--{name}"),
        }
    }

    /// `{a,b,c}`, or an empty string without choices.
    pub fn choices_display(&self) -> String {
        if self.choices.is_empty() {
            return String::new();
        }
        format!("{{{}}}", self.choices.join(","))
    }

    /// Usage fragment such as `[-o OUT]` or `FILE [FILE ...]`.
    pub fn usage(&self) -> String {
        // Positional arities already spell out whether values are optional.
        let bracket = !self.required && !self.positional;
        let mut buf = String::new();
        if bracket {
            buf.push('[');
        }
        let mut sep = "";
        if !self.positional {
            if let Some(first) = self.names.first() {
                buf.push_str(&self.prefixed(first));
                sep = " ";
            }
        }

        let metas = self.usage_metavars();
        let meta = |i: usize| metas[i.min(metas.len() - 1)].to_uppercase();
        match self.arity {
            Arity::Exact(0) if self.positional => buf.push_str(&meta(0)),
            Arity::Exact(n) => {
                let values = (0..n).map(meta).collect::<Vec<_>>();
                if !values.is_empty() {
                    buf.push_str(sep);
                    buf.push_str(&values.join(" "));
                }
            }
            Arity::Optional => {
                buf.push_str(sep);
                buf.push_str(&format!("[{}]", meta(0)));
            }
            Arity::ZeroOrMore => {
                buf.push_str(sep);
                buf.push_str(&format!("[{} [{} ...]]", meta(0), meta(1)));
            }
            Arity::OneOrMore => {
                buf.push_str(sep);
                buf.push_str(&format!("{} [{} ...]", meta(0), meta(1)));
            }
            Arity::Remainder => {
                buf.push_str(sep);
                buf.push_str("...");
            }
        }

        if bracket {
            buf.push(']');
        }
        buf
    }

    fn usage_metavars(&self) -> Vec<String> {
        if !self.metavars.is_empty() {
            return self.metavars.clone();
        }
        if !self.choices.is_empty() {
            return vec![self.choices_display()];
        }
        vec![self.dest.clone()]
    }

    /// Construction-time contract checks, run by `Parser::add`.
    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if self.names.is_empty() {
            return Err(ConfigError::NoNames { dest: self.dest.clone() });
        }
        if !self.action.accepts(self.arity) {
            return Err(ConfigError::ArityMismatch {
                option: self.display_name(),
                action: self.action,
                arity: self.arity,
            });
        }
        if let Some(choice) = self.choices.iter().find(|it| !validate::coercible(self.kind, it)) {
            return Err(ConfigError::ChoiceKind {
                option: self.display_name(),
                choice: choice.clone(),
                kind: self.kind,
            });
        }
        Ok(())
    }
}

use crate::{validate, Argument, Arity, Error, Namespace, Parser, Result, Value};

/// What happens when an argument is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Store the consumed value, or a list of them for multi-value arities.
    Store,
    /// Store the argument's constant.
    StoreConst,
    #[default]
    StoreTrue,
    StoreFalse,
    /// Append each consumed value to a list. With nothing to consume
    /// (arity `0`, or `?` without a value) the default is appended.
    Append,
    /// Append the argument's constant to a list.
    AppendConst,
    /// Print the parser's help and stop with [`Error::ShowHelp`].
    ShowHelp,
    /// Print the parser's version and stop with [`Error::ShowVersion`].
    ShowVersion,
}

impl Action {
    /// Whether this action can work with `arity`. Store needs something to
    /// consume, the constant and sentinel actions must consume nothing.
    pub fn accepts(self, arity: Arity) -> bool {
        match self {
            Action::Store => arity != Arity::Exact(0),
            Action::Append => true,
            Action::StoreConst
            | Action::StoreTrue
            | Action::StoreFalse
            | Action::AppendConst
            | Action::ShowHelp
            | Action::ShowVersion => arity == Arity::Exact(0),
        }
    }

    /// Runs the action for `arg` against the current leftovers, writing into
    /// `ns`, and returns the leftovers it did not consume.
    ///
    /// On error nothing has been written.
    pub(crate) fn apply<'a>(
        self,
        parser: &Parser,
        ns: &mut Namespace,
        arg: &Argument,
        args: &'a [String],
    ) -> Result<&'a [String]> {
        let dest = arg.dest_name();
        let rest = match self {
            Action::Store => {
                let (values, rest) = claim(arg, args)?;
                if arg.arity().is_multiple() {
                    ns.set(dest, values.to_vec());
                } else if let Some(value) = values.first() {
                    ns.set(dest, value.as_str());
                }
                rest
            }
            Action::Append => {
                let (values, rest) = claim(arg, args)?;
                if values.is_empty() && matches!(arg.arity(), Arity::Exact(0) | Arity::Optional) {
                    ns.push(dest, arg.default_value().to_string());
                }
                for value in values {
                    ns.push(dest, value.clone());
                }
                rest
            }
            Action::StoreConst => {
                ns.set(dest, arg.constant_value());
                args
            }
            Action::StoreTrue => {
                ns.set(dest, Value::Bool(true));
                args
            }
            Action::StoreFalse => {
                ns.set(dest, Value::Bool(false));
                args
            }
            Action::AppendConst => {
                ns.push(dest, arg.constant_value().to_string());
                args
            }
            Action::ShowHelp => {
                print!("{}", parser.help_text());
                return Err(Error::ShowHelp);
            }
            Action::ShowVersion => {
                println!("{}", parser.version_text());
                return Err(Error::ShowVersion);
            }
        };
        tracing::trace!(
            option = %arg.display_name(),
            action = ?self,
            consumed = args.len() - rest.len(),
            "applied action"
        );
        Ok(rest)
    }
}

/// Splits the values `arg`'s arity claims off the front of `args` and
/// validates each of them.
fn claim<'a>(arg: &Argument, args: &'a [String]) -> Result<(&'a [String], &'a [String])> {
    let n = match arg.arity() {
        Arity::Exact(n) => {
            if args.len() < n {
                return Err(Error::TooFewArgs {
                    option: arg.display_name(),
                    expected: n,
                    found: args.len(),
                });
            }
            n
        }
        Arity::Optional => args.len().min(1),
        Arity::ZeroOrMore | Arity::Remainder => args.len(),
        Arity::OneOrMore => {
            if args.is_empty() {
                return Err(Error::MissingOneOrMoreArgs { option: arg.display_name() });
            }
            args.len()
        }
    };
    let (values, rest) = args.split_at(n);
    for value in values {
        validate::value(arg, value)?;
    }
    Ok((values, rest))
}

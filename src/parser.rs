use std::{
    ffi::OsString,
    fmt, mem,
    path::Path,
    sync::{Arc, OnceLock},
};

use indexmap::IndexMap;
use regex::Regex;

use crate::{
    help, tokenize, validate, Action, Argument, ConfigError, Error, Namespace, Result, Value,
};

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

const DEFAULT_WIDTH: usize = 80;

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Every declared destination, with its parsed or default value.
    pub namespace: Namespace,
    /// Arguments no option or positional claimed.
    pub leftovers: Vec<String>,
    /// Names of the sub-commands that were selected, outermost first.
    pub commands: Vec<String>,
}

/// Declared arguments and sub-commands for one command level.
///
/// A parser is built once and parses once: a second call to
/// [`parse`](Parser::parse) fails with [`Error::AlreadyParsed`] rather than
/// re-seeding defaults over the first result.
pub struct Parser {
    prog: String,
    description: String,
    epilog: String,
    version: String,
    width: Option<usize>,
    env: Option<EnvLookup>,
    args: Vec<Argument>,
    commands: IndexMap<String, Parser>,
    namespace: Namespace,
    parsed: bool,
}

impl Parser {
    pub fn new(prog: &str) -> Parser {
        Parser {
            prog: prog.to_string(),
            description: String::new(),
            epilog: String::new(),
            version: String::new(),
            width: None,
            env: None,
            args: Vec::new(),
            commands: IndexMap::new(),
            namespace: Namespace::new(),
            parsed: false,
        }
    }

    /// Uses the last component of `path` (usually `argv[0]`) as the program
    /// name.
    pub fn from_path(path: impl AsRef<Path>) -> Parser {
        let path = path.as_ref();
        let prog = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
        Parser::new(&prog)
    }

    pub fn description(mut self, text: &str) -> Parser {
        self.description = text.to_string();
        self
    }

    pub fn epilog(mut self, text: &str) -> Parser {
        self.epilog = text.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Parser {
        self.version = version.to_string();
        self
    }

    /// Fixes the help text width instead of reading `COLUMNS`.
    pub fn width(mut self, width: usize) -> Parser {
        self.width = Some(width);
        self
    }

    /// Replaces the environment lookup used for `$NAME` defaults and
    /// `COLUMNS`. Sub-commands added afterwards inherit it.
    pub fn env_lookup<F>(mut self, lookup: F) -> Parser
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Some(Arc::new(lookup));
        self
    }

    /// Declares an argument. Fails if its action and arity don't fit
    /// together, or one of its names is already taken.
    pub fn add(&mut self, arg: Argument) -> Result<&mut Parser, ConfigError> {
        arg.check()?;
        let taken = arg.names().iter().find(|name| self.args.iter().any(|it| it.has_name(name)));
        if let Some(name) = taken {
            return Err(ConfigError::DuplicateName { name: name.clone() });
        }
        self.args.push(arg);
        Ok(self)
    }

    pub fn add_all<I>(&mut self, args: I) -> Result<&mut Parser, ConfigError>
    where
        I: IntoIterator<Item = Argument>,
    {
        for arg in args {
            self.add(arg)?;
        }
        Ok(self)
    }

    /// Adds `-h, --help`.
    pub fn add_help(&mut self) -> Result<&mut Parser, ConfigError> {
        self.add(Argument::new("h help", "help").action(Action::ShowHelp).help("Show program help"))
    }

    /// Adds `-v, --version`.
    pub fn add_version(&mut self) -> Result<&mut Parser, ConfigError> {
        self.add(
            Argument::new("v version", "version")
                .action(Action::ShowVersion)
                .help("Show program version"),
        )
    }

    /// Registers `child` as the sub-command `name`. Its program name becomes
    /// `"<prog> <name>"`.
    pub fn command(&mut self, name: &str, mut child: Parser) -> Result<&mut Parser, ConfigError> {
        if name.is_empty() || self.commands.contains_key(name) {
            return Err(ConfigError::DuplicateCommand { name: name.to_string() });
        }
        child.prog = format!("{} {name}", self.prog);
        if child.env.is_none() {
            child.env = self.env.clone();
        }
        if child.width.is_none() {
            child.width = self.width;
        }
        self.commands.insert(name.to_string(), child);
        Ok(self)
    }

    /// First argument with `name` among its public names.
    pub fn get(&self, name: &str) -> Result<&Argument> {
        self.args
            .iter()
            .find(|it| it.has_name(name))
            .ok_or_else(|| Error::InvalidFlagName { name: name.to_string() })
    }

    pub fn prog(&self) -> &str {
        &self.prog
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.args
    }

    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn subcommand(&self, name: &str) -> Option<&Parser> {
        self.commands.get(name)
    }

    /// The namespace as left by the last parse.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn description_text(&self) -> &str {
        &self.description
    }

    pub fn epilog_text(&self) -> &str {
        &self.epilog
    }

    pub fn help_text(&self) -> String {
        help::render(self)
    }

    pub fn version_text(&self) -> String {
        format!("{} version {}", self.prog, self.version)
    }

    pub fn show_help(&self) {
        print!("{}", self.help_text());
    }

    pub fn show_version(&self) {
        println!("{}", self.version_text());
    }

    pub(crate) fn display_width(&self) -> usize {
        self.width
            .or_else(|| self.lookup_env("COLUMNS").and_then(|it| it.trim().parse().ok()))
            .filter(|&it| it > 0)
            .unwrap_or(DEFAULT_WIDTH)
    }

    fn lookup_env(&self, key: &str) -> Option<String> {
        match &self.env {
            Some(lookup) => lookup(key),
            None => std::env::var(key).ok(),
        }
    }

    /// Parses the process arguments, skipping the program path.
    pub fn parse_env(&mut self) -> Result<Parsed> {
        let args = std::env::args_os()
            .skip(1)
            .map(|arg: OsString| arg.into_string().map_err(|arg| Error::InvalidUtf8 { arg }))
            .collect::<Result<Vec<_>>>()?;
        self.parse(args)
    }

    /// Parses `args` (without the program name).
    ///
    /// Option tokens are dispatched first, in the order they appear, each
    /// consuming values from the front of the leftover tokens. What remains
    /// goes to the remainder argument, if any, and then to positional
    /// arguments in declaration order.
    ///
    /// With sub-commands, only the tokens before the first command name are
    /// parsed at this level. The command parses the rest, and its values are
    /// merged over this level's.
    pub fn parse<I, S>(&mut self, args: I) -> Result<Parsed>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.parsed {
            return Err(Error::AlreadyParsed);
        }
        self.parsed = true;

        let args = args.into_iter().map(Into::into).collect::<Vec<String>>();
        tracing::debug!(prog = %self.prog, ?args, "parsing");

        let mut ns = mem::take(&mut self.namespace);
        let res = self.parse_into(&mut ns, &args);
        self.namespace = ns;
        let (leftovers, commands) = res?;

        tracing::debug!(prog = %self.prog, ?leftovers, "parsed");
        Ok(Parsed { namespace: self.namespace.clone(), leftovers, commands })
    }

    fn parse_into(
        &mut self,
        ns: &mut Namespace,
        args: &[String],
    ) -> Result<(Vec<String>, Vec<String>)> {
        let mut pending = self.seed(ns)?;
        let (own, sub) = self.split_at_command(args);

        let mut leftovers = self.dispatch(ns, own, &mut pending)?;

        if let Some(&idx) = pending.first() {
            let name = self.args[idx].display_name();
            tracing::debug!(%name, "required option missing");
            return Err(Error::MissingOption { name });
        }

        if self.commands.is_empty() {
            return Ok((leftovers, Vec::new()));
        }
        let Some(sub) = sub else {
            return Err(Error::MissingParser { names: self.commands.keys().cloned().collect() });
        };
        let (rest, commands) = self.delegate(ns, sub)?;
        leftovers.extend(rest);
        Ok((leftovers, commands))
    }

    /// Splits `args` at the first token naming a sub-command. Everything
    /// before it belongs to this level; a token escaped by `--` never
    /// selects a command.
    fn split_at_command<'a>(&self, args: &'a [String]) -> (&'a [String], Option<&'a [String]>) {
        let mut i = 0;
        while i < args.len() {
            if args[i] == "--" {
                i += 2;
                continue;
            }
            if self.commands.contains_key(args[i].as_str()) {
                return (&args[..i], Some(&args[i..]));
            }
            i += 1;
        }
        (args, None)
    }

    /// Runs option tokens, the remainder and positionals of this level over
    /// `args`, clearing satisfied entries from `pending`. Returns what is
    /// left unclaimed.
    fn dispatch(
        &self,
        ns: &mut Namespace,
        args: &[String],
        pending: &mut Vec<usize>,
    ) -> Result<Vec<String>> {
        let (options, leftovers) = tokenize(args);
        let mut rest = leftovers.as_slice();

        for name in &options {
            let idx = self
                .args
                .iter()
                .position(|it| !it.is_positional() && it.has_name(name))
                .ok_or_else(|| Error::InvalidOption { name: name.clone() })?;
            pending.retain(|&it| it != idx);

            let arg = &self.args[idx];
            if arg.arity().is_remainder() {
                continue;
            }
            rest = arg.action_kind().apply(self, ns, arg, rest)?;
        }

        if !rest.is_empty() {
            let remainder = self.args.iter().enumerate().find(|(_, it)| it.arity().is_remainder());
            if let Some((idx, arg)) = remainder {
                pending.retain(|&it| it != idx);
                rest = arg.action_kind().apply(self, ns, arg, rest)?;
            }
        }

        for (idx, arg) in self.args.iter().enumerate() {
            if !arg.is_positional() || arg.arity().is_remainder() {
                continue;
            }
            pending.retain(|&it| it != idx);
            rest = arg.action_kind().apply(self, ns, arg, rest)?;
        }

        Ok(rest.to_vec())
    }

    /// Writes every destination's starting value and returns the indices of
    /// required arguments.
    fn seed(&self, ns: &mut Namespace) -> Result<Vec<usize>> {
        let mut pending = Vec::new();
        for (idx, arg) in self.args.iter().enumerate() {
            if arg.is_required() {
                pending.push(idx);
            }
            let default = self.resolve_default(arg.default_value())?;
            let value = match arg.action_kind() {
                Action::StoreTrue => Value::Bool(validate::parse_bool(&default).unwrap_or(false)),
                Action::StoreFalse => Value::Bool(validate::parse_bool(&default).unwrap_or(true)),
                _ => Value::Scalar(default),
            };
            ns.set(arg.dest_name(), value);
        }
        Ok(pending)
    }

    fn resolve_default(&self, default: &str) -> Result<String> {
        if !env_var_re().is_match(default) {
            return Ok(default.to_string());
        }
        let name = &default[1..];
        self.lookup_env(name).ok_or_else(|| Error::MissingEnvVar { name: name.to_string() })
    }

    /// Hands `args[1..]` to the sub-command named by `args[0]`.
    fn delegate(
        &mut self,
        ns: &mut Namespace,
        args: &[String],
    ) -> Result<(Vec<String>, Vec<String>)> {
        let name = &args[0];
        let Some(child) = self.commands.get_mut(name.as_str()) else {
            return Err(Error::MissingParser { names: self.commands.keys().cloned().collect() });
        };
        tracing::debug!(command = %name, "dispatching to sub-command");

        let parsed = child.parse(args[1..].iter().cloned())?;
        ns.merge(parsed.namespace);

        let mut commands = vec![name.clone()];
        commands.extend(parsed.commands);
        Ok((parsed.leftovers, commands))
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("prog", &self.prog)
            .field("args", &self.args)
            .field("commands", &self.commands)
            .field("parsed", &self.parsed)
            .finish_non_exhaustive()
    }
}

/// `$NAME`, where the name starts with a letter or underscore.
fn env_var_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\$[A-Za-z_][0-9A-Za-z_]*$").unwrap())
}

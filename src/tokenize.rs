use std::sync::OnceLock;

use regex::Regex;

/// Splits raw arguments into option names and everything else.
///
/// `-abc` is three short options `a`, `b` and `c`; `--name` is the single
/// option `name`. Other tokens, including negative numbers and a lone `-`,
/// are leftovers. A `--` forces the one token after it into the leftovers.
///
/// Order is kept within each list, but not between them: the parser feeds
/// leftovers to options from the front.
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> (Vec<String>, Vec<String>) {
    let mut options = Vec::new();
    let mut leftovers = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_ref();
        i += 1;

        if arg == "--" && i < args.len() {
            leftovers.push(args[i].as_ref().to_string());
            i += 1;
            continue;
        }

        if let Some(long) = arg.strip_prefix("--").filter(|it| long_re().is_match(it)) {
            options.push(long.to_string());
        } else if let Some(short) = arg.strip_prefix('-').filter(|it| short_re().is_match(it)) {
            options.extend(short.chars().map(String::from));
        } else {
            leftovers.push(arg.to_string());
        }
    }

    tracing::trace!(?options, ?leftovers, "tokenized");
    (options, leftovers)
}

fn long_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap())
}

fn short_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]+$").unwrap())
}

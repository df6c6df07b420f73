//! A two-command tool in the shape of a JWT helper. Only argument handling
//! is shown: the commands echo what they would do.
//!
//! Run with `RUST_LOG=argvise=trace` to watch the parser work.

use argvise::{Action, Argument, ConfigError, Parser};
use tracing_subscriber::EnvFilter;

fn cli() -> Result<Parser, ConfigError> {
    let mut enc = Parser::new("enc").description("Generate a signed token from key=value pairs");
    enc.add_help()?
        .add(Argument::option("s secret", "secret").required().help("Signing key"))?
        .add(
            Argument::option("d data", "data")
                .action(Action::Append)
                .metavar(["key=value"])
                .help("Claim to include, may be repeated"),
        )?;

    let mut dec = Parser::new("dec").description("Print the claims of a token");
    dec.add_help()?.add(Argument::positional("token", "token").help("Encoded token"))?;

    let mut p = Parser::from_path(std::env::args().next().unwrap_or_default())
        .description("Encode and decode JSON Web Tokens")
        .version(env!("CARGO_PKG_VERSION"));
    p.add_help()?.add_version()?.command("enc", enc)?.command("dec", dec)?;
    Ok(p)
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut p = match cli() {
        Ok(it) => it,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2)
        }
    };

    let parsed = match p.parse_env() {
        Ok(it) => it,
        Err(err) if err.is_sentinel() => return,
        Err(err) => {
            eprintln!("{err}\n");
            eprint!("{}", p.help_text());
            std::process::exit(1)
        }
    };

    let ns = &parsed.namespace;
    match parsed.commands.first().map(String::as_str) {
        Some("enc") => {
            let claims = ns.list("data").unwrap_or_default();
            let key = ns.string("secret").unwrap_or_default();
            println!("signing {} claim(s) with a {} byte key", claims.len(), key.len());
        }
        Some("dec") => println!("decoding {}", ns.string("token").unwrap_or_default()),
        _ => unreachable!("parser requires a command"),
    }
}

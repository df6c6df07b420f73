use argvise::{Argument, Parser};

fn main() {
    let mut p = Parser::from_path(std::env::args().next().unwrap_or_default());
    let declared = p
        .add(Argument::positional("name", "name").help("Who to greet"))
        .and_then(|p| p.add(Argument::flag("e emoji", "emoji").help("Use a fancier bang")));
    if let Err(err) = declared {
        eprintln!("{err}");
        std::process::exit(2)
    }

    match p.parse_env() {
        Ok(parsed) => {
            let ns = &parsed.namespace;
            let bang = if ns.flag("emoji").unwrap_or(false) { "❣️" } else { "!" };
            println!("Hello {}{}", ns.string("name").unwrap_or_default(), bang);
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1)
        }
    }
}

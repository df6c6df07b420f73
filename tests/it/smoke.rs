use argvise::{Action, Argument, Parser, ValueKind};

pub fn parser() -> Parser {
    let mut p = Parser::new("rust-analyzer");
    p.add(Argument::positional("workspace", "workspace"))
        .unwrap()
        .add(Argument::option("n number", "number").kind(ValueKind::Int).required())
        .unwrap()
        .add(Argument::option("log-file", "log_file"))
        .unwrap()
        .add(Argument::new("v verbose", "verbose").action(Action::AppendConst).constant("v"))
        .unwrap()
        .add(Argument::option("data", "data").action(Action::Append))
        .unwrap()
        .add(Argument::flag("e emoji", "emoji"))
        .unwrap()
        .add(
            Argument::option("c color", "color")
                .choices(["auto", "always", "never"])
                .default("auto"),
        )
        .unwrap();
    p
}

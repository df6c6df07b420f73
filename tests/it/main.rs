mod help;
mod smoke;

use std::fmt::Write;

use argvise::{Action, Argument, Parsed, Parser};
use expect_test::{expect, Expect};

fn check<F>(build: F, args: &str, expect: Expect)
where
    F: FnOnce() -> Parser,
{
    let args = args.split_ascii_whitespace().collect::<Vec<_>>();
    let res = build().parse(args);
    match res {
        Ok(parsed) => {
            expect.assert_eq(&render(&parsed));
        }
        Err(err) => {
            expect.assert_eq(&err.to_string());
        }
    }
}

fn render(parsed: &Parsed) -> String {
    let mut buf = String::new();
    for (key, value) in parsed.namespace.iter() {
        writeln!(buf, "{key}: {value:?}").unwrap();
    }
    if !parsed.leftovers.is_empty() {
        writeln!(buf, "leftovers: {:?}", parsed.leftovers).unwrap();
    }
    if !parsed.commands.is_empty() {
        writeln!(buf, "commands: {:?}", parsed.commands).unwrap();
    }
    buf
}

fn required_out() -> Parser {
    let mut p = Parser::new("prog");
    p.add(Argument::option("o", "out").required()).unwrap();
    p
}

fn defaults() -> Parser {
    let mut p = Parser::new("defaults");
    p.add_all([
        Argument::option("level", "level").default("3"),
        Argument::flag("f force", "force"),
        Argument::new("q quiet", "quiet").action(Action::StoreFalse),
        Argument::new("mode", "mode").action(Action::StoreConst).constant("fast").default("slow"),
        Argument::option("t tag", "tags").action(Action::Append),
    ])
    .unwrap();
    p
}

#[test]
fn required_option() {
    check(
        required_out,
        "-o result.txt",
        expect![[r#"
            out: Scalar("result.txt")
        "#]],
    );
    check(required_out, "", expect![[r#"option "-o" required"#]]);
    check(required_out, "-x", expect![[r#"invalid option "x""#]]);
}

#[test]
fn defaults_fill_every_destination() {
    check(
        defaults,
        "",
        expect![[r#"
            level: Scalar("3")
            force: Bool(false)
            quiet: Bool(true)
            mode: Scalar("slow")
            tags: Scalar("")
        "#]],
    );
    check(
        defaults,
        "--mode -q -t a -t b --level 5 -f",
        expect![[r#"
            level: Scalar("5")
            force: Bool(true)
            quiet: Bool(false)
            mode: Scalar("fast")
            tags: List(["a", "b"])
        "#]],
    );
}

#[test]
fn smoke() {
    check(
        smoke::parser,
        "-n 92 .",
        expect![[r#"
            workspace: Scalar(".")
            number: Scalar("92")
            log_file: Scalar("")
            verbose: Scalar("")
            data: Scalar("")
            emoji: Bool(false)
            color: Scalar("auto")
        "#]],
    );
    check(
        smoke::parser,
        "-n 92 -v --verbose -v --data 0xDEAD --log-file /tmp/log.txt --data 0xBEEF .",
        expect![[r#"
            workspace: Scalar(".")
            number: Scalar("92")
            log_file: Scalar("/tmp/log.txt")
            verbose: List(["v", "v", "v"])
            data: List(["0xDEAD", "0xBEEF"])
            emoji: Bool(false)
            color: Scalar("auto")
        "#]],
    );
    check(
        smoke::parser,
        "-ev -n 3 ws",
        expect![[r#"
            workspace: Scalar("ws")
            number: Scalar("3")
            log_file: Scalar("")
            verbose: List(["v"])
            data: Scalar("")
            emoji: Bool(true)
            color: Scalar("auto")
        "#]],
    );
    check(
        smoke::parser,
        "-c always -n 1 . extra",
        expect![[r#"
            workspace: Scalar(".")
            number: Scalar("1")
            log_file: Scalar("")
            verbose: Scalar("")
            data: Scalar("")
            emoji: Bool(false)
            color: Scalar("always")
            leftovers: ["extra"]
        "#]],
    );
}

#[test]
fn smoke_errors() {
    check(smoke::parser, "-n 92 --werbose", expect![[r#"invalid option "werbose""#]]);
    check(smoke::parser, "", expect!["workspace: expected 1 argument(s) but was provided 0"]);
    check(smoke::parser, ".", expect![[r#"option "-n, --number" required"#]]);
    check(smoke::parser, "-n", expect!["-n, --number: expected 1 argument(s) but was provided 0"]);
    check(smoke::parser, "-n lol .", expect![[r#"-n, --number: invalid int value: "lol""#]]);
    check(
        smoke::parser,
        "-c pink -n 1 .",
        expect![[r#"-c, --color: invalid choice "pink" (choose from: auto, always, never)"#]],
    );
}

#[test]
fn values_come_from_the_front_of_the_leftovers() {
    // Option tokens and values are split apart first, so `-n` takes the
    // first leftover regardless of where it stood on the command line.
    check(smoke::parser, "ws -n 92", expect![[r#"-n, --number: invalid int value: "ws""#]]);
}

#[test]
fn double_dash_escapes_one_token() {
    check(
        smoke::parser,
        "--data -- --weird -n 1 .",
        expect![[r#"
            workspace: Scalar(".")
            number: Scalar("1")
            log_file: Scalar("")
            verbose: Scalar("")
            data: List(["--weird"])
            emoji: Bool(false)
            color: Scalar("auto")
        "#]],
    );
}

#[test]
fn positional_order() {
    check(
        positional::copy,
        "a b c",
        expect![[r#"
            src: List(["a", "b"])
            dst: Scalar("c")
        "#]],
    );
    check(
        positional::copy,
        "a b c d",
        expect![[r#"
            src: List(["a", "b"])
            dst: Scalar("c")
            leftovers: ["d"]
        "#]],
    );
    check(positional::copy, "a b", expect!["dst: expected 1 argument(s) but was provided 0"]);
    check(positional::copy, "a", expect!["src: expected 2 argument(s) but was provided 1"]);
}

#[test]
fn optional_positionals() {
    check(
        positional::greet,
        "",
        expect![[r#"
            shout: Bool(false)
            name: Scalar("world")
            extra: List([])
        "#]],
    );
    check(
        positional::greet,
        "bob x y -s",
        expect![[r#"
            shout: Bool(true)
            name: Scalar("bob")
            extra: List(["x", "y"])
        "#]],
    );
}

#[test]
fn remainder() {
    check(
        positional::exec,
        "-n echo hi",
        expect![[r#"
            pattern: Scalar(".*")
            dry: Bool(true)
            exec: List(["echo", "hi"])
        "#]],
    );
    check(
        positional::exec,
        "-x -n echo hi",
        expect![[r#"
            pattern: Scalar(".*")
            dry: Bool(true)
            exec: List(["echo", "hi"])
        "#]],
    );
    check(
        positional::exec,
        "",
        expect![[r#"
            pattern: Scalar(".*")
            dry: Bool(false)
            exec: Scalar("")
        "#]],
    );
    // The remainder is claimed before positionals get their turn.
    check(
        positional::exec,
        "grep",
        expect![[r#"
            pattern: Scalar(".*")
            dry: Bool(false)
            exec: List(["grep"])
        "#]],
    );
}

#[test]
fn only_the_first_remainder_claims_leftovers() {
    check(
        positional::two_remainders,
        "x y",
        expect![[r#"
            a: List(["x", "y"])
            b: Scalar("")
        "#]],
    );
}

#[test]
fn required_remainder() {
    check(positional::required_remainder, "", expect![[r#"option "-c, --cmd" required"#]]);
    check(
        positional::required_remainder,
        "ls /tmp",
        expect![[r#"
            cmd: List(["ls", "/tmp"])
        "#]],
    );
    check(
        positional::required_remainder,
        "-c",
        expect![[r#"
            cmd: Scalar("")
        "#]],
    );
}

#[test]
fn subcommands() {
    check(
        subcommands::jwt,
        "enc -s key -d a=1 -d b=2",
        expect![[r#"
            help: Scalar("")
            version: Scalar("")
            secret: Scalar("key")
            data: List(["a=1", "b=2"])
            commands: ["enc"]
        "#]],
    );
    check(
        subcommands::jwt,
        "dec abc.def",
        expect![[r#"
            help: Scalar("")
            version: Scalar("")
            token: Scalar("abc.def")
            commands: ["dec"]
        "#]],
    );
    check(subcommands::jwt, "", expect!["must use an available command: {enc,dec}"]);
    check(subcommands::jwt, "sign", expect!["must use an available command: {enc,dec}"]);
    check(subcommands::jwt, "enc", expect![[r#"option "-s, --secret" required"#]]);
    check(
        subcommands::jwt,
        "enc -s",
        expect!["-s, --secret: expected 1 argument(s) but was provided 0"],
    );
    check(subcommands::jwt, "enc --help", expect!["help requested"]);
}

#[test]
fn options_before_the_subcommand_belong_to_the_parent() {
    check(
        subcommands::ship,
        "-t x run -f",
        expect![[r#"
            help: Scalar("")
            token: Scalar("x")
            force: Bool(true)
            commands: ["run"]
        "#]],
    );
    check(subcommands::ship, "run", expect![[r#"option "-t, --token" required"#]]);
    check(subcommands::ship, "run -t x", expect![[r#"option "-t, --token" required"#]]);
    check(subcommands::ship, "-t x run --token y", expect![[r#"invalid option "token""#]]);
    check(subcommands::ship, "-t x", expect!["must use an available command: {run}"]);
    check(subcommands::ship, "--help", expect!["help requested"]);
    check(subcommands::jwt, "--version", expect!["version requested"]);
    check(subcommands::git, "-q remote", expect!["must use an available command: {add}"]);
}

#[test]
fn subcommand_leftovers_are_kept() {
    check(
        subcommands::jwt,
        "dec abc.def extra",
        expect![[r#"
            help: Scalar("")
            version: Scalar("")
            token: Scalar("abc.def")
            leftovers: ["extra"]
            commands: ["dec"]
        "#]],
    );
    check(
        subcommands::git,
        "remote add o u x",
        expect![[r#"
            quiet: Bool(false)
            name: Scalar("o")
            url: Scalar("u")
            fetch: Bool(false)
            leftovers: ["x"]
            commands: ["remote", "add"]
        "#]],
    );
    check(
        subcommands::git,
        "-q stray remote add o u",
        expect![[r#"
            quiet: Bool(true)
            name: Scalar("o")
            url: Scalar("u")
            fetch: Bool(false)
            leftovers: ["stray"]
            commands: ["remote", "add"]
        "#]],
    );
}

#[test]
fn nested_subcommands() {
    check(
        subcommands::git,
        "remote add origin https://x -f",
        expect![[r#"
            quiet: Bool(false)
            name: Scalar("origin")
            url: Scalar("https://x")
            fetch: Bool(true)
            commands: ["remote", "add"]
        "#]],
    );
    check(subcommands::git, "remote", expect!["must use an available command: {add}"]);
}

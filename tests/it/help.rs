use argvise::{Argument, Arity, Parser};
use expect_test::expect;

use crate::subcommands;

fn exc() -> Parser {
    let mut p =
        Parser::new("exc").description("Construct and execute arguments from Stdin").width(80);
    p.add_help()
        .unwrap()
        .add_version()
        .unwrap()
        .add(
            Argument::positional("pattern", "pattern")
                .nargs(Arity::Optional)
                .help("Stdin regex grouping pattern"),
        )
        .unwrap()
        .add(Argument::flag("n dry-run", "dry").help("Output commands instead of executing"))
        .unwrap()
        .add(
            Argument::option("x exec", "exec")
                .nargs(Arity::Remainder)
                .help("Parsable command string"),
        )
        .unwrap();
    p
}

#[test]
fn help_sections() {
    expect![[r#"
        usage: exc [-h] [-v] [-n] [-x ...] [PATTERN]

        Construct and execute arguments from Stdin

        positional arguments:
          [PATTERN]      Stdin regex grouping pattern

        optional arguments:
          -h, --help     Show program help
          -v, --version  Show program version
          -n, --dry-run  Output commands instead of executing
          -x, --exec     Parsable command string
    "#]]
    .assert_eq(&exc().help_text());
}

#[test]
fn help_wraps_to_width() {
    let mut p = Parser::new("tool").epilog("See the manual for more.").width(40);
    p.add(
        Argument::option("o output", "output").help("Where to write the result of the computation"),
    )
    .unwrap()
    .command("build", Parser::new("build"))
    .unwrap()
    .command("clean", Parser::new("clean"))
    .unwrap();

    expect![[r#"
        usage: tool [-o OUTPUT]
                    {build,clean} ...

        optional arguments:
          -o, --output  Where to write the
                        result of the
                        computation

        commands:
          {build,clean}

        See the manual for more.
    "#]]
    .assert_eq(&p.help_text());
}

#[test]
fn help_and_version_stop_parsing() {
    let mut p = exc();
    let err = p.parse(["--help", "ignored"]).unwrap_err();
    assert!(err.is_help());

    let mut p = exc();
    let err = p.parse(["-n", "-v"]).unwrap_err();
    assert!(err.is_version());
    assert!(err.is_sentinel());
}

#[test]
fn version_and_command_names() {
    let p = subcommands::jwt();
    assert_eq!(p.version_text(), "jwt version 1.0.0");
    assert_eq!(p.command_names().collect::<Vec<_>>(), ["enc", "dec"]);
    assert_eq!(p.subcommand("enc").unwrap().prog(), "jwt enc");
    assert_eq!(p.subcommand("enc").unwrap().description_text(), "Generate JSON Web Tokens");
}

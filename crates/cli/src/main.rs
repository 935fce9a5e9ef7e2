use anyhow::Result;
use argot::Parser;
use tracing_subscriber::{EnvFilter, fmt};

const HELPTEXT: &str = "\
Usage: argot [FLAGS] [OPTIONS] [ARGUMENTS]
       argot boo [FLAGS] [OPTIONS] [ARGUMENTS]

Parses its own command line and prints what it found.

Flags:
  -b, --bool            Boolean flag
      --json            Print the parse result as JSON
  -h, --help            Print this help text and exit
  -v, --version         Print the version number and exit

Options:
  -s, --string <str>    String option (default: \"default\")
  -i, --int <int>       Integer option (default: 123)
  -f, --float <float>   Floating-point option (default: 1.0)
  -l, --list <str>...   Greedy string option

Commands:
  boo                   Demo command
  help <command>        Print a command's help text";

const BOO_HELPTEXT: &str = "\
Usage: argot boo [FLAGS] [OPTIONS] [ARGUMENTS]

Demo command. Prints its own parse result when it runs.

Flags:
  -f, --foo             Boolean flag
  -h, --help            Print this help text and exit

Options:
  -b, --bar <str>       String option (default: \"default\")";

fn main() -> Result<()> {
    init_tracing();

    let mut parser = build_parser();
    parser.parse_env();

    tracing::debug!(
        command = parser.command_name().unwrap_or("<none>"),
        "arguments parsed"
    );

    if parser.found("json") {
        println!("{}", serde_json::to_string_pretty(&parser.snapshot())?);
    } else {
        parser.print();
    }
    Ok(())
}

fn build_parser() -> Parser {
    let mut parser = Parser::new();
    parser
        .helptext(HELPTEXT)
        .version(format!("argot {}", env!("CARGO_PKG_VERSION")));

    parser.flag("bool b");
    parser.flag("json");
    parser.str_opt("string s", "default");
    parser.int_opt("int i", 123);
    parser.float_opt("float f", 1.0);
    parser.str_opt("list l", "").greedy(true);

    let boo = parser.cmd("boo");
    boo.helptext(BOO_HELPTEXT);
    boo.flag("foo f");
    boo.str_opt("bar b", "default");
    boo.callback(|name, cmd| {
        tracing::debug!(command = name, "running callback");
        println!("---------- callback: {name} ----------");
        cmd.print();
        println!("---------------------------------\n");
    });

    parser
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

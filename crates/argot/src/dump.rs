//! Human-readable and serializable views of a parser's state.

use serde::Serialize;
use std::fmt::Write as _;

use crate::option::{OptionKind, Value};
use crate::parser::Parser;

/// Serializable state of a parser tree after parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Snapshot {
    pub options: Vec<SnapshotOption>,
    pub positionals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<SnapshotCommand>,
}

/// One alias and the option behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SnapshotOption {
    pub name: String,
    pub kind: OptionKind,
    pub count: usize,
    pub fallback: Value,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SnapshotCommand {
    pub name: String,
    pub parser: Box<Snapshot>,
}

impl Parser {
    /// Render the registered options, positionals and matched command.
    ///
    /// The layout is meant for debugging and may change.
    pub fn dump(&self) -> String {
        let mut out = String::from("Flags/Options:\n");
        let mut any = false;
        for (name, opt) in self.options() {
            any = true;
            let _ = writeln!(out, "  {name}: {}", opt.describe());
        }
        if !any {
            out.push_str("  [none]\n");
        }

        out.push_str("\nArguments:\n");
        if self.has_positionals() {
            for arg in self.positionals() {
                let _ = writeln!(out, "  {arg}");
            }
        } else {
            out.push_str("  [none]\n");
        }

        out.push_str("\nCommand:\n");
        let _ = writeln!(out, "  {}", self.command_name().unwrap_or("[none]"));
        out
    }

    /// Write [`Parser::dump`] to stdout.
    pub fn print(&self) {
        print!("{}", self.dump());
    }

    pub fn snapshot(&self) -> Snapshot {
        let options = self
            .options()
            .map(|(name, opt)| SnapshotOption {
                name: name.to_string(),
                kind: opt.kind(),
                count: opt.count(),
                fallback: opt.fallback().clone(),
                values: opt.values().to_vec(),
            })
            .collect();

        let command = self
            .command_name()
            .zip(self.command_parser())
            .map(|(name, parser)| SnapshotCommand {
                name: name.to_string(),
                parser: Box::new(parser.snapshot()),
            });

        Snapshot {
            options,
            positionals: self.positionals().to_vec(),
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;

    #[test]
    fn empty_parser_dump() {
        let parser = Parser::new();
        assert_eq!(
            parser.dump(),
            "Flags/Options:\n  [none]\n\nArguments:\n  [none]\n\nCommand:\n  [none]\n"
        );
    }

    #[test]
    fn populated_dump_lists_every_alias() {
        let mut parser = Parser::new();
        parser.flag("bool b");
        parser.float_opt("float f", 1.0);
        parser.cmd("boo");
        parser
            .try_parse(["-bb", "--float", "2.5", "arg", "-f", "3"])
            .unwrap();

        assert_eq!(
            parser.dump(),
            "Flags/Options:\n\
             \x20 bool: 2\n\
             \x20 b: 2\n\
             \x20 float: (1.000000) [2.500000, 3.000000]\n\
             \x20 f: (1.000000) [2.500000, 3.000000]\n\
             \n\
             Arguments:\n\
             \x20 arg\n\
             \n\
             Command:\n\
             \x20 [none]\n"
        );
    }

    #[test]
    fn dump_names_matched_command() {
        let mut parser = Parser::new();
        parser.cmd("boo");
        parser.try_parse(["boo"]).unwrap();
        assert!(parser.dump().ends_with("Command:\n  boo\n"));
    }

    #[test]
    fn snapshot_serializes_recursively() {
        let mut parser = Parser::new();
        parser.int_opt("int i", 123);
        parser.cmd("boo").str_opt("bar b", "default");
        parser.try_parse(["boo", "-b", "x", "pos"]).unwrap();

        let json = serde_json::to_value(parser.snapshot()).unwrap();
        assert_eq!(json["options"][0]["name"], "int");
        assert_eq!(json["options"][0]["kind"], "int");
        assert_eq!(json["options"][0]["fallback"], 123);
        assert_eq!(json["options"][0]["count"], 0);
        assert!(json["positionals"].as_array().unwrap().is_empty());

        let command = &json["command"];
        assert_eq!(command["name"], "boo");
        assert_eq!(command["parser"]["options"][1]["name"], "b");
        assert_eq!(command["parser"]["options"][1]["values"][0], "x");
        assert_eq!(command["parser"]["positionals"][0], "pos");
        assert!(command["parser"].get("command").is_none());
    }
}

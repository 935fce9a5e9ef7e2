use std::fmt;

use crate::error::{Error, Result};
use crate::map::AliasMap;
use crate::option::{FromValue, Opt};
use crate::positionals::Positionals;
use crate::stream::ArgStream;

/// Index into a parser's option store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OptId(usize);

/// Index into a parser's command store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CmdId(usize);

/// Hook run after a command's own arguments have been parsed. It receives the
/// command name as typed and the command's parser.
pub type Callback = Box<dyn FnMut(&str, &Parser)>;

/// How a parse ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every token was consumed.
    Parsed,
    /// `--help`, `-h` or `help <command>` was requested. Holds the text to show.
    Help(String),
    /// `--version` or `-v` was requested. Holds the version string.
    Version(String),
}

/// One level of command-line grammar: the root program or a command.
///
/// Register flags, options and commands, call [`Parser::try_parse`] (or
/// [`Parser::parse`]), then query the results.
///
/// ```
/// let mut parser = argot::Parser::new();
/// parser.flag("verbose v");
/// parser.int_opt("jobs j", 1);
/// parser.try_parse(["-vj", "4", "input.txt"]).unwrap();
///
/// assert!(parser.found("verbose"));
/// assert_eq!(parser.value::<i32>("jobs").unwrap(), 4);
/// assert_eq!(parser.positional(0), Some("input.txt"));
/// ```
#[derive(Default)]
pub struct Parser {
    helptext: Option<String>,
    version: Option<String>,
    options: Vec<Opt>,
    option_names: AliasMap<OptId>,
    commands: Vec<Parser>,
    command_names: AliasMap<CmdId>,
    positionals: Positionals,
    matched: Option<(String, CmdId)>,
    callback: Option<Callback>,
    help_command: bool,
    first_positional_ends_options: bool,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("helptext", &self.helptext)
            .field("version", &self.version)
            .field("options", &self.options)
            .field("option_names", &self.option_names)
            .field("commands", &self.commands)
            .field("command_names", &self.command_names)
            .field("positionals", &self.positionals)
            .field("matched", &self.matched)
            .field("callback", &self.callback.is_some())
            .field("help_command", &self.help_command)
            .field("first_positional_ends_options", &self.first_positional_ends_options)
            .finish()
    }
}

// Registration.
impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// By-value form of [`Parser::helptext`].
    pub fn with_helptext(mut self, text: impl Into<String>) -> Self {
        self.helptext(text);
        self
    }

    pub fn with_version(mut self, text: impl Into<String>) -> Self {
        self.version(text);
        self
    }

    /// Supplying help text activates automatic `--help` / `-h` handling.
    pub fn helptext(&mut self, text: impl Into<String>) -> &mut Self {
        self.helptext = Some(text.into());
        self
    }

    /// Supplying a version string activates automatic `--version` / `-v`
    /// handling.
    pub fn version(&mut self, text: impl Into<String>) -> &mut Self {
        self.version = Some(text.into());
        self
    }

    /// Toggle the automatic `help <command>` command. It is switched on when
    /// the first command is registered.
    pub fn help_command(&mut self, enable: bool) -> &mut Self {
        self.help_command = enable;
        self
    }

    /// Treat everything after the first positional argument as positional,
    /// POSIX style.
    pub fn first_positional_ends_options(&mut self, enable: bool) -> &mut Self {
        self.first_positional_ends_options = enable;
        self
    }

    /// Register a boolean flag under the space-separated `aliases`.
    pub fn flag(&mut self, aliases: &str) -> &mut Opt {
        self.register(aliases, Opt::flag())
    }

    /// Register a string option. `fallback` is returned until a value is given.
    pub fn str_opt(&mut self, aliases: &str, fallback: impl Into<String>) -> &mut Opt {
        self.register(aliases, Opt::string(fallback))
    }

    /// Register an `i32` option. Values accept `0x` and leading-`0` prefixes.
    pub fn int_opt(&mut self, aliases: &str, fallback: i32) -> &mut Opt {
        self.register(aliases, Opt::int(fallback))
    }

    /// Register an `f64` option.
    pub fn float_opt(&mut self, aliases: &str, fallback: f64) -> &mut Opt {
        self.register(aliases, Opt::float(fallback))
    }

    fn register(&mut self, aliases: &str, opt: Opt) -> &mut Opt {
        let id = OptId(self.options.len());
        for alias in aliases.split(' ').filter(|a| self.command_names.contains(a)) {
            tracing::warn!(alias, "option alias is also a command name");
        }
        self.options.push(opt);
        self.option_names.add_split(aliases, id);
        &mut self.options[id.0]
    }

    /// Register a command and return its parser for further registration.
    pub fn cmd(&mut self, name: &str) -> &mut Parser {
        if self.option_names.contains(name) {
            tracing::warn!(command = name, "command name is also an option alias");
        }
        let id = CmdId(self.commands.len());
        self.commands.push(Parser::new());
        self.command_names.add(name, id);
        self.help_command = true;
        &mut self.commands[id.0]
    }

    /// Set the hook invoked when this (command) parser has finished parsing.
    pub fn callback(&mut self, callback: impl FnMut(&str, &Parser) + 'static) -> &mut Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

// Parsing.
impl Parser {
    /// Parse `args` (without the program name).
    ///
    /// Parsing stops at the first error. Help and version requests are
    /// reported through [`Outcome`]; the process is never terminated.
    pub fn try_parse<I, T>(&mut self, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut stream = ArgStream::new(&args);
        self.scan(&mut stream)
    }

    /// Like [`Parser::try_parse`], but acts on the outcome the way a program's
    /// front end usually wants to: help and version text go to stdout with
    /// exit status 0, errors go to stderr with exit status 1.
    pub fn parse<I, T>(&mut self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        match self.try_parse(args) {
            Ok(Outcome::Parsed) => {}
            Ok(Outcome::Help(text) | Outcome::Version(text)) => {
                if !text.is_empty() {
                    println!("{text}");
                }
                std::process::exit(0);
            }
            Err(err) => err.exit(),
        }
    }

    /// [`Parser::parse`] over the process arguments, skipping the program name.
    pub fn parse_env(&mut self) {
        self.parse(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
    }

    fn scan(&mut self, stream: &mut ArgStream<'_>) -> Result<Outcome> {
        let mut options_enabled = true;
        let mut first = true;

        while let Some(arg) = stream.next() {
            let is_first = std::mem::replace(&mut first, false);
            tracing::trace!(arg, options_enabled, "scanning argument");

            if !options_enabled {
                self.positionals.push(arg);
                continue;
            }

            if arg == "--" {
                options_enabled = false;
                continue;
            }

            if let Some(body) = arg.strip_prefix("--") {
                if let Some(outcome) = self.handle_long(body, stream)? {
                    return Ok(outcome);
                }
                continue;
            }

            if let Some(body) = arg.strip_prefix('-') {
                if body.is_empty() || body.starts_with(|c: char| c.is_ascii_digit()) {
                    // `-` and negative numbers.
                    self.push_positional(arg, &mut options_enabled);
                } else if let Some(outcome) = self.handle_short(body, stream)? {
                    return Ok(outcome);
                }
                continue;
            }

            if is_first {
                if let Some(id) = self.command_names.get(arg) {
                    return self.dispatch(arg, id, stream);
                }
                if self.help_command && arg == "help" {
                    return self.help_for_command(stream);
                }
            }

            self.push_positional(arg, &mut options_enabled);
        }

        Ok(Outcome::Parsed)
    }

    fn push_positional(&mut self, arg: &str, options_enabled: &mut bool) {
        self.positionals.push(arg);
        if self.first_positional_ends_options {
            *options_enabled = false;
        }
    }

    /// `--name`, `--name value` or `--name=value`.
    fn handle_long(&mut self, body: &str, stream: &mut ArgStream<'_>) -> Result<Option<Outcome>> {
        if let Some((name, value)) = body.split_once('=') {
            self.handle_equals("--", name, value, stream)?;
            return Ok(None);
        }

        if let Some(id) = self.option_names.get(body) {
            self.take_value(id, stream, || format!("--{body}"))?;
            return Ok(None);
        }

        if body == "help" {
            if let Some(text) = &self.helptext {
                tracing::debug!("--help requested");
                return Ok(Some(Outcome::Help(text.clone())));
            }
        }
        if body == "version" {
            if let Some(text) = &self.version {
                tracing::debug!("--version requested");
                return Ok(Some(Outcome::Version(text.clone())));
            }
        }

        Err(Error::UnknownLong(body.to_string()))
    }

    /// `-x`, `-xyz` (each character handled in turn) or `-x=value`.
    fn handle_short(&mut self, body: &str, stream: &mut ArgStream<'_>) -> Result<Option<Outcome>> {
        if let Some((name, value)) = body.split_once('=') {
            self.handle_equals("-", name, value, stream)?;
            return Ok(None);
        }

        let bundled = body.chars().count() > 1;
        for ch in body.chars() {
            let mut buf = [0u8; 4];
            let key: &str = ch.encode_utf8(&mut buf);

            if let Some(id) = self.option_names.get(key) {
                // Each value-taking character claims the next token, so
                // `-sif a 1 2.0` fills s, i and f in order.
                self.take_value(id, stream, || {
                    if bundled {
                        format!("'{ch}' in -{body}")
                    } else {
                        format!("-{ch}")
                    }
                })?;
                continue;
            }

            match (ch, &self.helptext, &self.version) {
                ('h', Some(text), _) => {
                    tracing::debug!("-h requested");
                    return Ok(Some(Outcome::Help(text.clone())));
                }
                ('v', _, Some(text)) => {
                    tracing::debug!("-v requested");
                    return Ok(Some(Outcome::Version(text.clone())));
                }
                _ => {
                    return Err(Error::UnknownShort {
                        ch,
                        token: body.to_string(),
                    });
                }
            }
        }
        Ok(None)
    }

    fn handle_equals(
        &mut self,
        prefix: &'static str,
        name: &str,
        value: &str,
        stream: &mut ArgStream<'_>,
    ) -> Result<()> {
        let Some(id) = self.option_names.get(name) else {
            return Err(Error::UnknownOption {
                prefix,
                name: name.to_string(),
            });
        };
        let opt = &mut self.options[id.0];
        if !opt.takes_value() {
            return Err(Error::FlagWithValue {
                prefix,
                name: name.to_string(),
            });
        }
        if value.is_empty() {
            return Err(Error::EmptyValue {
                prefix,
                name: name.to_string(),
            });
        }
        opt.try_parse(value)?;
        if opt.is_greedy() {
            consume_greedy(opt, stream)?;
        }
        Ok(())
    }

    /// Record one occurrence of the option: flags count themselves, anything
    /// else consumes the next token.
    fn take_value(
        &mut self,
        id: OptId,
        stream: &mut ArgStream<'_>,
        display: impl FnOnce() -> String,
    ) -> Result<()> {
        let opt = &mut self.options[id.0];
        if !opt.takes_value() {
            opt.append_flag();
            return Ok(());
        }
        let Some(token) = stream.next() else {
            return Err(Error::MissingValue(display()));
        };
        opt.try_parse(token)?;
        if opt.is_greedy() {
            consume_greedy(opt, stream)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, name: &str, id: CmdId, stream: &mut ArgStream<'_>) -> Result<Outcome> {
        tracing::debug!(command = name, consumed = stream.consumed(), "dispatching to command");
        self.matched = Some((name.to_string(), id));

        let child = &mut self.commands[id.0];
        let outcome = child.scan(stream)?;
        if outcome != Outcome::Parsed {
            return Ok(outcome);
        }

        if let Some(mut callback) = child.callback.take() {
            tracing::debug!(command = name, "running command callback");
            callback(name, &*child);
            child.callback = Some(callback);
        }
        Ok(Outcome::Parsed)
    }

    /// The automatic `help <command>` command.
    fn help_for_command(&self, stream: &mut ArgStream<'_>) -> Result<Outcome> {
        let Some(target) = stream.next() else {
            return Err(Error::HelpCommandMissingArg);
        };
        let Some(id) = self.command_names.get(target) else {
            return Err(Error::UnknownCommand(target.to_string()));
        };
        tracing::debug!(command = target, "help command requested");
        let text = self.commands[id.0].helptext.clone().unwrap_or_default();
        Ok(Outcome::Help(text))
    }
}

/// Whether a token would be read as an option (or `--`) rather than a value.
fn looks_like_option(token: &str) -> bool {
    match token.strip_prefix('-') {
        Some(rest) => !(rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_digit())),
        None => false,
    }
}

fn consume_greedy(opt: &mut Opt, stream: &mut ArgStream<'_>) -> Result<()> {
    while let Some(next) = stream.peek() {
        if looks_like_option(next) {
            break;
        }
        stream.next();
        opt.try_parse(next)?;
    }
    Ok(())
}

// Queries.
impl Parser {
    /// The option registered under `name`, if any.
    pub fn option(&self, name: &str) -> Option<&Opt> {
        self.option_names.get(name).map(|id| &self.options[id.0])
    }

    /// Every registered alias with its option, in registration order. Options
    /// registered under several aliases appear once per alias.
    pub fn options(&self) -> impl Iterator<Item = (&str, &Opt)> + '_ {
        self.option_names
            .iter()
            .map(|(name, id)| (name, &self.options[id.0]))
    }

    fn lookup(&self, name: &str) -> Result<&Opt> {
        self.option(name)
            .ok_or_else(|| Error::UnknownName(name.to_string()))
    }

    /// Whether the flag or option occurred at least once. Unregistered names
    /// are never found.
    pub fn found(&self, name: &str) -> bool {
        self.option(name).is_some_and(Opt::found)
    }

    /// How many times the flag or option occurred, across all its aliases.
    pub fn count(&self, name: &str) -> usize {
        self.option(name).map_or(0, Opt::count)
    }

    /// The last value given for `name`, or its fallback.
    pub fn value<T: FromValue>(&self, name: &str) -> Result<T> {
        let opt = self.lookup(name)?;
        opt.typed(name, opt.current())
    }

    /// The value of the `index`-th occurrence of `name`.
    pub fn value_at<T: FromValue>(&self, name: &str, index: usize) -> Result<Option<T>> {
        let opt = self.lookup(name)?;
        opt.check_kind::<T>(name)?;
        opt.value_at(index).map(|v| opt.typed(name, v)).transpose()
    }

    /// Every value given for `name`, in command-line order.
    pub fn values<T: FromValue>(&self, name: &str) -> Result<Vec<T>> {
        let opt = self.lookup(name)?;
        opt.check_kind::<T>(name)?;
        opt.values().iter().map(|v| opt.typed(name, v)).collect()
    }

    pub fn has_positionals(&self) -> bool {
        !self.positionals.is_empty()
    }

    pub fn positional_count(&self) -> usize {
        self.positionals.len()
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index)
    }

    pub fn positionals(&self) -> &[String] {
        self.positionals.as_slice()
    }

    /// Every positional parsed as an integer, failing on the first bad one.
    pub fn positionals_as_ints(&self) -> Result<Vec<i32>> {
        self.positionals.as_ints()
    }

    pub fn positionals_as_floats(&self) -> Result<Vec<f64>> {
        self.positionals.as_floats()
    }

    /// Whether a command matched during parsing.
    pub fn has_command(&self) -> bool {
        self.matched.is_some()
    }

    /// The matched command's name, as it appeared on the command line.
    pub fn command_name(&self) -> Option<&str> {
        self.matched.as_ref().map(|(name, _)| name.as_str())
    }

    /// The matched command's parser.
    pub fn command_parser(&self) -> Option<&Parser> {
        self.matched.as_ref().map(|(_, id)| &self.commands[id.0])
    }

    /// A registered command's parser, matched or not.
    pub fn command(&self, name: &str) -> Option<&Parser> {
        self.command_names.get(name).map(|id| &self.commands[id.0])
    }

    pub fn command_mut(&mut self, name: &str) -> Option<&mut Parser> {
        self.command_names
            .get(name)
            .map(|id| &mut self.commands[id.0])
    }

    pub fn get_helptext(&self) -> Option<&str> {
        self.helptext.as_deref()
    }

    pub fn get_version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn has_help_command(&self) -> bool {
        self.help_command
    }
}

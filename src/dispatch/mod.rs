//! Command line parsing and tree search.
//!
//! A line has the form `<command>[ <arguments>]`. The command token ends at the
//! first space; everything after that single space is handed to the handler
//! untouched, including further spaces.
//!
//! # Matching
//!
//! Each tree node compares its name against the token over the length of the
//! *stored* name only, with the token reading as a NUL byte past its end. A
//! token that starts with a registered name therefore selects that command:
//!
//! ```text
//! stored "stop", token "stop"   -> match
//! stored "stop", token "stopx"  -> match
//! stored "stop", token "sto"    -> "stop" sorts after, go left
//! ```
//!
//! Registration refuses names that overlap this way, so every registered
//! name selects its own command.
//!
//! # Built-in help
//!
//! Unless disabled with [`CommandTable::set_help`], three forms are answered
//! by the table itself:
//!
//! ```text
//! help        -> help::list
//! help -d     -> help::list_with_descriptions
//! <name>?     -> help::describe
//! ```
//!
//! `<name>?` is checked before the tree search, because `stop?` would
//! otherwise select `stop`. `help` is only used when no registered command
//! matched.
//!
//! # Examples
//!
//! ```rust
//! use libcommander::dispatch::Dispatch;
//! use libcommander::response::{BufferResponse, Response};
//! use libcommander::table::CommandTable;
//!
//! let mut table = CommandTable::<4>::new();
//! table
//!     .register("echo", "Print the arguments", |args, response| response.println(args))
//!     .unwrap();
//! table.init().unwrap();
//!
//! let mut response = BufferResponse::<64>::new();
//! assert_eq!(table.execute("echo hello  world", &mut response), Dispatch::Executed);
//! assert_eq!(response.as_str(), "hello  world\r\n");
//!
//! response.clear();
//! assert_eq!(table.execute("reboot", &mut response), Dispatch::NotFound);
//! assert_eq!(response.as_str(), "Command 'reboot' not found!\r\n");
//! ```

use core::cmp::Ordering;

use log::debug;

use crate::help;
use crate::response::Response;
use crate::table::{Command, CommandTable};

/// Separator between the command token and the argument tail.
pub const SEPARATOR: u8 = b' ';

/// Token of the built-in command listing.
pub const HELP_COMMAND: &str = "help";

/// Argument of [`HELP_COMMAND`] that adds descriptions to the listing.
pub const HELP_DESCRIPTIONS: &str = "-d";

/// Suffix that asks for the description of a command.
pub const DESCRIBE_SUFFIX: char = '?';

/// Outcome of [`CommandTable::execute`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Dispatch {
    /// A handler was found and called.
    Executed,
    /// No command matched; the response received a not-found message.
    NotFound,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Dispatch {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Dispatch::Executed => defmt::write!(f, "Executed"),
            Dispatch::NotFound => defmt::write!(f, "NotFound"),
        }
    }
}

/// Split a line into its command token and argument tail.
///
/// Only the first space is consumed; the tail is empty when there is none.
///
/// ```rust
/// use libcommander::dispatch::split_line;
///
/// assert_eq!(split_line("led on  fast"), ("led", "on  fast"));
/// assert_eq!(split_line("reset"), ("reset", ""));
/// assert_eq!(split_line(" x"), ("", "x"));
/// ```
pub fn split_line(line: &str) -> (&str, &str) {
    match line.bytes().position(|byte| byte == SEPARATOR) {
        Some(end) => (&line[..end], &line[end + 1..]),
        None => (line, ""),
    }
}

/// Compare a stored command name with a token over the stored name's length.
///
/// Bytes past the end of the token compare as NUL, so a shorter token sorts
/// before the stored name and a longer token that starts with it is `Equal`.
pub fn compare_prefix(stored: &str, token: &str) -> Ordering {
    let token = token.as_bytes();
    for (index, &byte) in stored.as_bytes().iter().enumerate() {
        let other = token.get(index).copied().unwrap_or(0);
        match byte.cmp(&other) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

impl<const N: usize> CommandTable<N> {
    /// Find the command a token selects, using prefix matching.
    pub fn lookup(&self, token: &str) -> Option<&Command> {
        let mut node = self.records.first();
        for _ in 0..self.records.len() {
            let record = node?;
            let next = match compare_prefix(record.name, token) {
                Ordering::Equal => return Some(record),
                Ordering::Greater => record.left,
                Ordering::Less => record.right,
            };
            node = self.records.get(usize::from(next?));
        }
        None
    }

    /// Execute one command line.
    ///
    /// The matching handler receives the argument tail and `response`. When no
    /// command matches, `Command '<token>' not found!` is written to
    /// `response` instead. The line is only borrowed and can be reused.
    ///
    /// The built-in help forms described in the [module docs](crate::dispatch) are
    /// handled here as well.
    pub fn execute(&self, line: &str, response: &mut dyn Response) -> Dispatch {
        if !self.is_initialized() && !self.is_empty() {
            debug!("executing on a command table that was not initialized");
        }

        let (token, args) = split_line(line);

        let describe = token
            .strip_suffix(DESCRIBE_SUFFIX)
            .filter(|name| self.help_enabled && !name.is_empty() && self.find(token).is_none());
        if let Some(name) = describe {
            return help::describe(self, name, response);
        }

        match self.lookup(token) {
            Some(command) => {
                (command.handler)(args, response);
                Dispatch::Executed
            }
            None if self.help_enabled && token == HELP_COMMAND => {
                if args.trim() == HELP_DESCRIPTIONS {
                    help::list_with_descriptions(self, response);
                } else {
                    help::list(self, response);
                }
                Dispatch::Executed
            }
            None => {
                response.print("Command '");
                response.print(token);
                response.println("' not found!");
                Dispatch::NotFound
            }
        }
    }
}

//! Command listings for help commands and host tooling.
//!
//! All functions walk the table in alphabetical order through
//! [`CommandTable::iter`] and never modify it.
//!
//! # Examples
//!
//! ```rust
//! use libcommander::help;
//! use libcommander::response::BufferResponse;
//! use libcommander::table::CommandTable;
//!
//! let mut table = CommandTable::<4>::new();
//! table.register("stop", "Stop the motor", |_, _| {}).unwrap();
//! table.register("left", "Turn left", |_, _| {}).unwrap();
//! table.init().unwrap();
//!
//! let mut response = BufferResponse::<64>::new();
//! help::list(&table, &mut response);
//! assert_eq!(response.as_str(), "0.\tleft\r\n1.\tstop\r\n");
//! ```

use serde::Serialize;
use serde::ser::Serializer;

use crate::dispatch::Dispatch;
use crate::response::Response;
use crate::table::{Command, CommandTable, Error};

/// Serializable view of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandInfo<'a> {
    /// Command name.
    pub name: &'a str,
    /// Command description.
    pub description: &'a str,
    /// Alphabetical position.
    pub rank: usize,
}

impl<'a> From<&'a Command> for CommandInfo<'a> {
    fn from(command: &'a Command) -> Self {
        Self {
            name: command.name,
            description: command.description,
            rank: command.rank(),
        }
    }
}

/// Write `<rank>.\t<name>` for every command.
pub fn list<const N: usize>(table: &CommandTable<N>, response: &mut dyn Response) {
    for command in table {
        write!(response, "{}.\t{}\r\n", command.rank(), command.name);
    }
}

/// Write `<name>\t<description>` for every command.
pub fn list_with_descriptions<const N: usize>(table: &CommandTable<N>, response: &mut dyn Response) {
    for command in table {
        response.print(command.name);
        response.print("\t");
        response.println(command.description);
    }
}

/// Write the description of the command called `name`.
///
/// The name has to match exactly. Unknown names get the same message as an
/// unknown command line.
pub fn describe<const N: usize>(
    table: &CommandTable<N>,
    name: &str,
    response: &mut dyn Response,
) -> Dispatch {
    match table.find(name) {
        Some(command) => {
            response.println(command.description);
            Dispatch::Executed
        }
        None => {
            response.print("Command '");
            response.print(name);
            response.println("' not found!");
            Dispatch::NotFound
        }
    }
}

struct Listing<'a, const N: usize>(&'a CommandTable<N>);

impl<const N: usize> Serialize for Listing<'_, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(CommandInfo::from))
    }
}

/// Serialize the table as a JSON array of [`CommandInfo`] into `buf`.
///
/// Returns the number of bytes written.
///
/// # Returns
///
/// * `Ok(len)` - JSON written to `buf[..len]`
/// * [`Error::BufferOverflow`] - `buf` is too small
pub fn to_json<const N: usize>(table: &CommandTable<N>, buf: &mut [u8]) -> Result<usize, Error> {
    serde_json_core::to_slice(&Listing(table), buf).map_err(|_| Error::BufferOverflow)
}

//! Fixed-capacity command table stored as a balanced binary search tree.
//!
//! The table owns a `heapless::Vec` of [`Command`] records. Tree links are
//! plain indices into that same vector, so building and balancing the tree
//! never allocates.
//!
//! # Lifecycle
//!
//! ```text
//! register / attach          init                      execute
//! ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐
//! │ append record,  │──▶│ rank in-order,       │──▶│ walk the tree,  │
//! │ insert into BST │   │ reorder by median,   │   │ call handler    │
//! │ by name         │   │ relink               │   │                 │
//! └─────────────────┘   └──────────────────────┘   └─────────────────┘
//! ```
//!
//! After [`init`](CommandTable::init), position 0 holds the record with the
//! median rank and the rest of the storage is in the pre-order of a
//! height-balanced tree. Registering another command afterwards keeps the tree
//! searchable but unbalanced until `init` runs again.
//!
//! # Examples
//!
//! ```rust
//! use libcommander::response::Response;
//! use libcommander::table::{Command, CommandTable};
//!
//! fn stop(_args: &str, response: &mut dyn Response) {
//!     response.println("stopped");
//! }
//!
//! fn start(_args: &str, response: &mut dyn Response) {
//!     response.println("started");
//! }
//!
//! static COMMANDS: [Command; 2] = [
//!     Command::new("stop", "Stop the motor", stop),
//!     Command::new("start", "Start the motor", start),
//! ];
//!
//! let mut table = CommandTable::<8>::new();
//! table.attach(&COMMANDS).unwrap();
//! table.init().unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert!(table.find("start").is_some());
//! ```

use core::cmp::Ordering;
use core::fmt;

use heapless::Vec;
use log::{debug, warn};

use crate::response::Response;

mod balancer;
pub mod error;
mod indexer;


pub use error::Error;

/// Capacity used by [`DefaultTable`].
pub const DEFAULT_CAPACITY: usize = 32;

/// A command table with [`DEFAULT_CAPACITY`] slots.
pub type DefaultTable = CommandTable<DEFAULT_CAPACITY>;

/// Function signature for command handlers.
///
/// Handlers receive the argument tail of the command line (everything after
/// the first space, verbatim) and the response channel of the caller. Errors
/// are reported by the handler itself through the response.
///
/// # Examples
///
/// ```rust
/// use libcommander::table::CommandFn;
///
/// let echo: CommandFn = |args, response| {
///     response.println(args);
/// };
/// ```
pub type CommandFn = fn(args: &str, response: &mut dyn Response);

/// A single command record.
///
/// Records are created with [`Command::new`] and copied into a
/// [`CommandTable`]. The rank and the tree links are owned by the table and
/// reset whenever a record is registered.
#[derive(Clone, Copy)]
pub struct Command {
    /// The command name as typed by the user.
    ///
    /// Names are case-sensitive, compared byte by byte and must be unique
    /// within a table. No name may start with another registered name.
    pub name: &'static str,

    /// A brief description of what the command does.
    pub description: &'static str,

    /// The function that implements the command.
    pub handler: CommandFn,

    pub(crate) rank: u16,
    pub(crate) left: Option<u16>,
    pub(crate) right: Option<u16>,
}

impl Command {
    /// Create a detached command record.
    pub const fn new(name: &'static str, description: &'static str, handler: CommandFn) -> Self {
        Self {
            name,
            description,
            handler,
            rank: 0,
            left: None,
            right: None,
        }
    }

    /// Position of this command in alphabetical order, valid after `init`.
    pub fn rank(&self) -> usize {
        usize::from(self.rank)
    }

    /// Storage index of the left child.
    pub fn left(&self) -> Option<usize> {
        self.left.map(usize::from)
    }

    /// Storage index of the right child.
    pub fn right(&self) -> Option<usize> {
        self.right.map(usize::from)
    }

    fn detached(self) -> Self {
        Self::new(self.name, self.description, self.handler)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("rank", &self.rank)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

/// A command table holding up to `N` commands.
///
/// `N` must not exceed `u16::MAX`; ranks and tree links are stored as `u16`.
#[derive(Debug)]
pub struct CommandTable<const N: usize> {
    pub(crate) records: Vec<Command, N>,
    initialized: bool,
    pub(crate) help_enabled: bool,
}

impl<const N: usize> Default for CommandTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CommandTable<N> {
    const CAPACITY_FITS_U16: () = assert!(
        N <= u16::MAX as usize,
        "command table capacity exceeds u16::MAX"
    );

    /// Create an empty table.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_FITS_U16;

        Self {
            records: Vec::new(),
            initialized: false,
            help_enabled: true,
        }
    }

    /// Enable or disable the built-in help.
    ///
    /// When enabled, [`execute`](Self::execute) answers `help`, `help -d` and
    /// `<name>?` itself. Registered commands are searched first, so a command
    /// called `help` replaces the built-in listing.
    pub fn set_help(&mut self, enabled: bool) {
        self.help_enabled = enabled;
    }

    /// Register one command.
    ///
    /// The record is appended to the storage and linked into the tree by name.
    /// The table has to be initialized again before it is balanced.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Command registered
    /// * [`Error::InvalidName`] - Empty command name
    /// * [`Error::Overflow`] - The table already holds `N` commands
    /// * [`Error::DuplicateName`] - A command with this name exists
    /// * [`Error::PrefixConflict`] - The name starts with a registered name, or
    ///   a registered name starts with it
    ///
    /// Dispatch matches a line on the length of the stored name, so `st` would
    /// also answer `stop`. Overlapping names are refused here for that reason.
    pub fn register(
        &mut self,
        name: &'static str,
        description: &'static str,
        handler: CommandFn,
    ) -> Result<(), Error> {
        self.push(Command::new(name, description, handler))
    }

    /// Register every command of `commands`, in order.
    ///
    /// Stops at the first command that cannot be registered and returns its
    /// error. Commands registered before the failure stay in the table.
    pub fn attach(&mut self, commands: &[Command]) -> Result<(), Error> {
        for command in commands {
            self.push(*command)?;
        }
        Ok(())
    }

    /// Rank every command alphabetically and rebuild storage as a balanced tree.
    ///
    /// Running `init` on an already balanced table leaves storage order and
    /// links unchanged. Neither step recurses over the tree depth: ranking
    /// walks with a stack of `N` indices and placement recurses only
    /// `log2(N)` deep.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Table balanced
    /// * [`Error::Corrupted`] - The tree links do not cover every record
    pub fn init(&mut self) -> Result<(), Error> {
        indexer::index(&mut self.records)?;
        balancer::balance(&mut self.records)?;
        self.initialized = true;

        debug!("command table initialized with {} commands", self.records.len());
        Ok(())
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of commands.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether [`init`](Self::init) ran after the last registration.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The root record of the tree.
    pub fn root(&self) -> Option<&Command> {
        self.records.first()
    }

    /// The record at a storage position.
    pub fn get(&self, index: usize) -> Option<&Command> {
        self.records.get(index)
    }

    /// Exact-name lookup.
    ///
    /// Unlike [`execute`](Self::execute), this does not accept a name that only
    /// starts with a registered command.
    pub fn find(&self, name: &str) -> Option<&Command> {
        let mut node = self.records.first();
        for _ in 0..self.records.len() {
            let record = node?;
            let next = match record.name.cmp(name) {
                Ordering::Greater => record.left,
                Ordering::Less => record.right,
                Ordering::Equal => return Some(record),
            };
            node = self.records.get(usize::from(next?));
        }
        None
    }

    /// Iterate over all commands in alphabetical order.
    pub fn iter(&self) -> InOrder<'_, N> {
        InOrder {
            records: &self.records,
            stack: Vec::new(),
            cursor: if self.records.is_empty() { None } else { Some(0) },
            remaining: self.records.len(),
        }
    }

    fn push(&mut self, command: Command) -> Result<(), Error> {
        if command.name.is_empty() {
            warn!("rejected command with empty name");
            return Err(Error::InvalidName);
        }

        if let Some(other) = self
            .records
            .iter()
            .find(|other| other.name != command.name && overlaps(other.name, command.name))
        {
            warn!("command '{}' overlaps '{}'", command.name, other.name);
            return Err(Error::PrefixConflict);
        }

        let index = self.records.len();
        if self.records.push(command.detached()).is_err() {
            warn!("command table full, '{}' rejected", command.name);
            return Err(Error::Overflow);
        }

        if let Err(err) = link(&mut self.records, index) {
            self.records.pop();
            warn!("command '{}' rejected: {}", command.name, err);
            return Err(err);
        }

        if self.initialized {
            warn!(
                "'{}' registered after init, table unbalanced until init runs again",
                command.name
            );
        }
        self.initialized = false;
        Ok(())
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

impl<'a, const N: usize> IntoIterator for &'a CommandTable<N> {
    type Item = &'a Command;
    type IntoIter = InOrder<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`CommandTable`].
///
/// Uses a bounded stack of at most `N` indices and yields at most `len`
/// records.
#[derive(Debug)]
pub struct InOrder<'a, const N: usize> {
    records: &'a [Command],
    stack: Vec<u16, N>,
    cursor: Option<u16>,
    remaining: usize,
}

impl<'a, const N: usize> Iterator for InOrder<'a, N> {
    type Item = &'a Command;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        while let Some(node) = self.cursor {
            if self.stack.push(node).is_err() {
                self.remaining = 0;
                return None;
            }
            self.cursor = self.records.get(usize::from(node))?.left;
        }

        let record = self.records.get(usize::from(self.stack.pop()?))?;
        self.cursor = record.right;
        self.remaining -= 1;
        Some(record)
    }
}

/// Insert the record at `index` into the tree rooted at position 0.
///
/// A node whose name sorts after the new name sends it left; everything else
/// goes right. Equal names are rejected before any link is written.
pub(crate) fn link(records: &mut [Command], index: usize) -> Result<(), Error> {
    let name = records.get(index).ok_or(Error::Corrupted)?.name;
    if index == 0 {
        return Ok(());
    }

    let mut node = 0;
    for _ in 0..records.len() {
        let current = records.get_mut(node).ok_or(Error::Corrupted)?;
        let child = match current.name.cmp(name) {
            Ordering::Greater => &mut current.left,
            Ordering::Less => &mut current.right,
            Ordering::Equal => return Err(Error::DuplicateName),
        };

        match *child {
            Some(next) => node = usize::from(next),
            None => {
                // index < N <= u16::MAX
                *child = Some(index as u16);
                return Ok(());
            }
        }
    }

    Err(Error::Corrupted)
}

//! Common error types for command table operations

use core::fmt;

/// A common error type for building and exporting a command table.
///
/// This enum defines the errors that can occur while registering commands,
/// balancing the table, or serializing it. It is designed to be simple and
/// portable for `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The table is full; the offending command was not registered.
    Overflow,
    /// A command with the same name is already registered.
    DuplicateName,
    /// The command name is empty.
    InvalidName,
    /// The command name starts with a registered name, or the other way round.
    PrefixConflict,
    /// The tree links do not reach every registered command.
    Corrupted,
    /// An output buffer was too small for the requested data.
    BufferOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Error::Overflow => "command table is full",
            Error::DuplicateName => "command name already registered",
            Error::InvalidName => "command name is empty",
            Error::PrefixConflict => "command name overlaps a registered name",
            Error::Corrupted => "command tree is corrupted",
            Error::BufferOverflow => "output buffer too small",
        };
        f.write_str(text)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Overflow => defmt::write!(f, "Overflow"),
            Error::DuplicateName => defmt::write!(f, "DuplicateName"),
            Error::InvalidName => defmt::write!(f, "InvalidName"),
            Error::PrefixConflict => defmt::write!(f, "PrefixConflict"),
            Error::Corrupted => defmt::write!(f, "Corrupted"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
        }
    }
}

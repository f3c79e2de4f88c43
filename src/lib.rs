//! # libcommander - Command Dispatcher for Embedded Systems
//!
//! A small command interpreter for devices that receive text commands over a
//! serial port, a socket or any other byte stream. Commands are declared once,
//! stored in a fixed-capacity table and searched as a balanced binary tree, so
//! lookup stays logarithmic without a heap allocator. This library supports
//! `no_std` environments.
//!
//! ## Features
//!
//! ### Command Table
//! - Fixed capacity chosen at compile time
//! - Balanced binary search tree built in place in the command storage
//! - Duplicate and empty names rejected at registration
//!
//! ### Dispatch
//! - `<command>[ <arguments>]` line format, arguments passed through verbatim
//! - Prefix matching on the stored command name
//! - Pluggable output channel shared by handlers and error reports
//!
//! ### Help
//! - Alphabetical command listing and per-command descriptions
//! - JSON export of the command table for host tools
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libcommander = "0.1.0"
//! ```
//!
//! ### Basic Example
//!
//! ```rust
//! use libcommander::response::{BufferResponse, Response};
//! use libcommander::table::{Command, CommandTable};
//!
//! fn led(args: &str, response: &mut dyn Response) {
//!     match args {
//!         "on" | "off" => response.println("ok"),
//!         _ => response.println("usage: led on|off"),
//!     }
//! }
//!
//! fn reset(_args: &str, response: &mut dyn Response) {
//!     response.println("resetting");
//! }
//!
//! static COMMANDS: [Command; 2] = [
//!     Command::new("led", "Switch the status LED", led),
//!     Command::new("reset", "Reset the device", reset),
//! ];
//!
//! let mut table = CommandTable::<8>::new();
//! table.attach(&COMMANDS).unwrap();
//! table.init().unwrap();
//!
//! let mut response = BufferResponse::<64>::new();
//! table.execute("led on", &mut response);
//! assert_eq!(response.as_str(), "ok\r\n");
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, AVR, etc.)
//! - Linux-based devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support and the stdout response (default: disabled)
//! - `defmt`: Enable defmt formatting of public enums for embedded debugging

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

/// Command storage, registration and tree balancing.
///
/// Holds the command records and turns them into a balanced binary search
/// tree stored in the same fixed-size array.
pub mod table;

/// Command line parsing and command execution.
pub mod dispatch;

/// Output channels used by the dispatcher and command handlers.
pub mod response;

/// Alphabetical listings and JSON export of a command table.
pub mod help;

pub use dispatch::Dispatch;
pub use response::Response;
pub use table::{Command, CommandFn, CommandTable, Error};

/// Register several commands on a table at once.
///
/// Panics if a command cannot be registered.
///
/// ```rust
/// use libcommander::{commands, table::CommandTable};
///
/// let mut table = CommandTable::<4>::new();
/// commands!(table,
///     ("ping", "Reply with pong", |_, response| response.println("pong")),
///     ("uptime", "Show uptime", |_, response| response.println("42 s")),
/// );
/// table.init().unwrap();
/// assert_eq!(table.len(), 2);
/// ```
#[macro_export]
macro_rules! commands {
    ($table:expr, $(($name:expr, $description:expr, $handler:expr)),+ $(,)?) => {
        $(
            $table.register($name, $description, $handler).expect("Failed to register command");
        )+
    };
}

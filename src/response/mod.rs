//! Output channels for command handlers.
//!
//! Every handler receives a `&mut dyn Response` next to its argument text. The
//! dispatcher uses the same channel to report unknown commands. A transport
//! only has to know how to emit text.
//!
//! # Stock Channels
//!
//! - **[`NullResponse`]**: discards everything, used when nobody is listening
//! - **[`BufferResponse`]**: collects output into a fixed-size `heapless::String`
//! - **[`FnResponse`]**: forwards output to a plain [`OutputFn`] (UART, RTT, ...)
//! - **`StdResponse`**: writes to stdout (requires the `std` feature)
//!
//! # Examples
//!
//! ```rust
//! use libcommander::response::{BufferResponse, Response};
//!
//! let mut response = BufferResponse::<64>::new();
//! response.print("temp: ");
//! core::write!(response, "{}.{}", 21, 5);
//! response.println("C");
//!
//! assert_eq!(response.as_str(), "temp: 21.5C\r\n");
//! ```

use core::fmt;

/// Line terminator appended by [`Response::println`].
pub const LINE_END: &str = "\r\n";

/// Function signature for raw text outputs.
///
/// Output functions receive text and are responsible for pushing it to the
/// actual transport. They are the simplest way to hook a serial port up to a
/// [`FnResponse`].
///
/// # Examples
///
/// ```rust
/// use libcommander::response::OutputFn;
///
/// let uart_output: OutputFn = |text| {
///     // Send text to UART
///     print!("{}", text);
/// };
/// ```
pub type OutputFn = fn(&str);

/// A text output capability.
///
/// Implementors only have to provide [`print`](Response::print). The
/// `write_fmt` method lets `core::write!` target any response without an
/// allocator; formatting errors are swallowed like a full serial FIFO would be.
pub trait Response {
    /// Emit `text` as-is.
    fn print(&mut self, text: &str);

    /// Emit `text` followed by [`LINE_END`].
    fn println(&mut self, text: &str) {
        self.print(text);
        self.print(LINE_END);
    }

    /// Emit formatted text. Backs the `write!` macro.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::write(&mut Adapter(self), args);
    }
}

struct Adapter<'a, R: Response + ?Sized>(&'a mut R);

impl<R: Response + ?Sized> fmt::Write for Adapter<'_, R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.print(s);
        Ok(())
    }
}

/// A response that drops all output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResponse;

impl Response for NullResponse {
    fn print(&mut self, _text: &str) {}
}

/// A response that collects output into a fixed-capacity string.
///
/// Text that does not fit is cut at the last whole character and the rest is
/// dropped. [`is_truncated`](Self::is_truncated) reports whether that happened.
#[derive(Debug, Default)]
pub struct BufferResponse<const B: usize> {
    buffer: heapless::String<B>,
    truncated: bool,
}

impl<const B: usize> BufferResponse<B> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            buffer: heapless::String::new(),
            truncated: false,
        }
    }

    /// Everything collected so far.
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    /// Whether any output was dropped because the buffer was full.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Drop the collected output and reset the truncation flag.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.truncated = false;
    }
}

impl<const B: usize> Response for BufferResponse<B> {
    fn print(&mut self, text: &str) {
        if self.buffer.push_str(text).is_ok() {
            return;
        }

        self.truncated = true;
        for ch in text.chars() {
            if self.buffer.push(ch).is_err() {
                break;
            }
        }
    }
}

/// A response that forwards every piece of text to an [`OutputFn`].
#[derive(Debug, Clone, Copy)]
pub struct FnResponse {
    output_fn: OutputFn,
}

impl FnResponse {
    /// Wrap an output function.
    pub const fn new(output_fn: OutputFn) -> Self {
        Self { output_fn }
    }
}

impl Response for FnResponse {
    fn print(&mut self, text: &str) {
        (self.output_fn)(text);
    }
}

/// A response writing to the process stdout.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdResponse;

#[cfg(feature = "std")]
impl Response for StdResponse {
    fn print(&mut self, text: &str) {
        use std::io::Write;

        let _ = std::io::stdout().write_all(text.as_bytes());
    }
}

//! Byte-stream sink adapter
//!
//! Lets a [`Console`](crate::console::Console) print over any
//! [`embedded_io::Write`] port (UART, USB CDC) by bridging it to
//! [`core::fmt::Write`].

use embedded_io::Write;

/// [`core::fmt::Write`] view of a byte-oriented serial port
pub struct SerialWriter<W: Write> {
    port: W,
}

impl<W: Write> SerialWriter<W> {
    pub fn new(port: W) -> Self {
        Self { port }
    }

    /// Flush the underlying port, e.g. at the end of a message burst.
    pub fn flush(&mut self) -> Result<(), W::Error> {
        self.port.flush()
    }

    pub fn into_inner(self) -> W {
        self.port
    }
}

impl<W: Write> core::fmt::Write for SerialWriter<W> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.port.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}

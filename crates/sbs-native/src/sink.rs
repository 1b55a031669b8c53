use std::io::Write;

/// `core::fmt::Write` sink over any `std::io::Write` stream (stdout in
/// practice)
pub struct IoSink<W: Write> {
    out: W,
}

impl<W: Write> IoSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> core::fmt::Write for IoSink<W> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.out.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}
